use std::fs::{self, File};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use serpentseal::rsa::{self, RsaKeyPair};
use serpentseal::{hybrid, serpent, sha256};

#[derive(Parser)]
#[command(name = "serpentseal")]
#[command(about = "Hybrid RSA + Serpent file encryption", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an RSA key pair and save it as three decimal lines (n, e, d)
    Keygen {
        /// Modulus size in bits
        #[arg(short, long, default_value_t = 1024)]
        bits: u64,

        /// Key file to write
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Encrypt a file under a fresh session key sealed with the RSA key
    Encrypt {
        input: PathBuf,
        output: PathBuf,

        /// RSA key file (n, e, d)
        #[arg(short, long)]
        key: PathBuf,

        /// File to store the sealed session key token
        #[arg(short, long)]
        session_out: PathBuf,
    },

    /// Decrypt a file produced by `encrypt`
    Decrypt {
        input: PathBuf,
        output: PathBuf,

        /// RSA key file (n, e, d)
        #[arg(short, long)]
        key: PathBuf,

        /// Sealed session key token file
        #[arg(short, long)]
        session: PathBuf,
    },

    /// Print the SHA-256 digest of a file
    Hash { input: PathBuf },

    /// Run the Serpent component diagnostic
    Selftest,
}

fn main() -> serpentseal::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { bits, out } => {
            let pair = rsa::keygen(bits)?;
            pair.write_to(File::create(&out)?)?;
            println!(
                "saved a {}-bit RSA key pair to {}",
                pair.bit_length(),
                out.display()
            );
        }
        Commands::Encrypt {
            input,
            output,
            key,
            session_out,
        } => {
            let pair = RsaKeyPair::read_from(File::open(&key)?)?;
            let envelope = hybrid::encrypt(
                File::open(&input)?,
                File::create(&output)?,
                &pair.public_key(),
            )?;
            fs::write(&session_out, &envelope.sealed_key)?;
            println!("sha256: {}", hex::encode(envelope.digest));
            println!("sealed session key: {}", session_out.display());
        }
        Commands::Decrypt {
            input,
            output,
            key,
            session,
        } => {
            let pair = RsaKeyPair::read_from(File::open(&key)?)?;
            let token = fs::read_to_string(&session)?;
            let digest = hybrid::decrypt(
                File::open(&input)?,
                File::create(&output)?,
                &token,
                &pair.private_key(),
            )?;
            println!("sha256: {}", hex::encode(digest));
        }
        Commands::Hash { input } => {
            println!("{}", hex::encode(sha256::digest(&fs::read(&input)?)));
        }
        Commands::Selftest => {
            serpent::self_test()?;
            println!("serpent component diagnostic passed");
        }
    }

    Ok(())
}

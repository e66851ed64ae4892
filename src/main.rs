// crypto-lab
// Command line front-end for the AES, RSA and SHA-256 facade

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use crypto_lab::aes::AesKeySize;
use crypto_lab::{CoreConfig, CryptoService, RsaKeyPairPem};

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "crypto-lab", version, about = "AES, RSA and SHA-256 playground")]
struct Args {
    /// AES key size in bits (128, 192 or 256); decrypt must use the same value
    #[arg(long, default_value_t = 256, env = "CRYPTO_LAB_AES_BITS")]
    aes_bits: u32,

    /// PBKDF2 iterations for passphrase-derived keys; decrypt must use the same value
    #[arg(long, default_value_t = 10_000, env = "CRYPTO_LAB_KDF_ITERATIONS")]
    kdf_iterations: u32,

    /// Miller-Rabin rounds per prime candidate
    #[arg(long, default_value_t = 40, env = "CRYPTO_LAB_MR_ROUNDS")]
    mr_rounds: usize,

    /// Largest accepted plaintext in bytes
    #[arg(long, default_value_t = 16 * 1024 * 1024, env = "CRYPTO_LAB_MAX_MESSAGE_LEN")]
    max_message_len: usize,

    /// RSA modulus size used when rsa-keygen is not given --bits
    #[arg(long, default_value_t = 1024, env = "CRYPTO_LAB_RSA_BITS")]
    rsa_bits: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash text with SHA-256 (reads stdin when TEXT is omitted)
    Sha256 { text: Option<String> },

    /// Encrypt text under a passphrase
    AesEncrypt {
        #[arg(short, long, env = "CRYPTO_LAB_PASSPHRASE")]
        passphrase: String,
        text: Option<String>,
    },

    /// Decrypt a base64 envelope produced by aes-encrypt
    ///
    /// The envelope does not record the key size or iteration count, so
    /// --aes-bits and --kdf-iterations must match the ones used to encrypt.
    AesDecrypt {
        #[arg(short, long, env = "CRYPTO_LAB_PASSPHRASE")]
        passphrase: String,
        ciphertext: Option<String>,
    },

    /// Generate an RSA key pair (Ctrl-C cancels)
    RsaKeygen {
        /// Modulus size in bits, even, 512..=4096 (defaults to --rsa-bits)
        #[arg(short, long)]
        bits: Option<u32>,

        /// Write the public key PEM here instead of printing JSON
        #[arg(long, requires = "private_out")]
        public_out: Option<PathBuf>,

        /// Write the private key PEM here instead of printing JSON
        #[arg(long, requires = "public_out")]
        private_out: Option<PathBuf>,
    },

    /// Encrypt text to a PEM public key
    RsaEncrypt {
        #[arg(short = 'k', long)]
        public_key: PathBuf,
        text: Option<String>,
    },

    /// Decrypt base64 ciphertext with a PEM private key
    RsaDecrypt {
        #[arg(short = 'k', long)]
        private_key: PathBuf,
        ciphertext: Option<String>,
    },
}

// ── Entry Point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crypto_lab=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = CoreConfig::new()
        .with_aes_key_size(AesKeySize::from_bits(args.aes_bits)?)
        .with_kdf_iterations(args.kdf_iterations)
        .with_miller_rabin_rounds(args.mr_rounds)
        .with_max_message_len(args.max_message_len)
        .with_default_rsa_bits(args.rsa_bits);
    let service = CryptoService::new(config).context("invalid configuration")?;

    match args.command {
        Command::Sha256 { text } => {
            println!("{}", service.generate_sha256(&input_or_stdin(text)?));
        }
        Command::AesEncrypt { passphrase, text } => {
            println!("{}", service.encrypt_aes(&input_or_stdin(text)?, &passphrase)?);
        }
        Command::AesDecrypt {
            passphrase,
            ciphertext,
        } => {
            let ciphertext = input_or_stdin(ciphertext)?;
            println!("{}", service.decrypt_aes(ciphertext.trim(), &passphrase)?);
        }
        Command::RsaKeygen {
            bits,
            public_out,
            private_out,
        } => {
            let bits = bits.unwrap_or(service.config().default_rsa_bits);
            let task = service.spawn_rsa_key_pair(bits);
            info!(bits, "generating RSA key pair");

            // Dropping the join future on Ctrl-C cancels the search
            let keypair = tokio::select! {
                result = task.join() => result?,
                _ = tokio::signal::ctrl_c() => bail!("key generation cancelled"),
            };
            let pem = RsaKeyPairPem::from(&keypair);

            match (public_out, private_out) {
                (Some(public_path), Some(private_path)) => {
                    fs::write(&public_path, &pem.public_key)
                        .with_context(|| format!("writing {}", public_path.display()))?;
                    fs::write(&private_path, &pem.private_key)
                        .with_context(|| format!("writing {}", private_path.display()))?;
                    info!(
                        public = %public_path.display(),
                        private = %private_path.display(),
                        "wrote key pair"
                    );
                }
                _ => println!("{}", pem.to_json()?),
            }
        }
        Command::RsaEncrypt { public_key, text } => {
            let pem = read_key(&public_key)?;
            println!("{}", service.encrypt_rsa(&input_or_stdin(text)?, &pem)?);
        }
        Command::RsaDecrypt {
            private_key,
            ciphertext,
        } => {
            let pem = read_key(&private_key)?;
            let ciphertext = input_or_stdin(ciphertext)?;
            println!("{}", service.decrypt_rsa(ciphertext.trim(), &pem)?);
        }
    }

    Ok(())
}

fn input_or_stdin(arg: Option<String>) -> anyhow::Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn read_key(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading key file {}", path.display()))
}

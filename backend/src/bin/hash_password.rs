//! Produce an Argon2id PHC string for seeding the `users.password_hash` column.
//!
//! ```text
//! echo -n 'correct horse' | hash-password --stdin
//! hash-password --password 'correct horse'
//! ```

use std::io::{self, Read, Write};

use clap::Parser;
use rating_backend::domain::PasswordDigest;

/// Hash a reviewer password.
#[derive(Debug, Parser)]
#[command(name = "hash-password", about = "Hash a reviewer password as an Argon2id PHC string")]
struct Cli {
    /// Password to hash. Prefer `--stdin` to keep it out of shell history.
    #[arg(long, conflicts_with = "stdin", required_unless_present = "stdin")]
    password: Option<String>,
    /// Read the password from standard input, trimming one trailing newline.
    #[arg(long)]
    stdin: bool,
}

fn read_password(cli: Cli) -> io::Result<String> {
    if let Some(password) = cli.password {
        return Ok(password);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn main() -> io::Result<()> {
    let password = read_password(Cli::parse())?;
    let digest = PasswordDigest::hash(&password).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", digest.as_str())
}

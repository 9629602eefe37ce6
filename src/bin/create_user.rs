//! Provisioning CLI: hash a password and insert an account directly.
//! Useful for bootstrapping the first admin, since the API has no signup.

use std::io::{self, Write};

use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use userforge_api::auth::passwords::PasswordService;

#[derive(Parser, Debug)]
#[command(name = "create_user", about = "Create a UserForge account")]
struct Args {
    /// Username for the account.
    #[arg(long)]
    username: String,

    /// Email address for the account (case insensitive).
    #[arg(long)]
    email: String,

    /// Plaintext password to hash and store for this user.
    #[arg(long)]
    password: String,

    /// Role to assign (`user` or `admin`).
    #[arg(long, default_value = "user")]
    role: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let email = args.email.trim().to_lowercase();
    let username = args.username.trim().to_string();

    if !email.contains('@') {
        writeln!(io::stderr(), "error: email must contain '@'")?;
        std::process::exit(1);
    }

    if username.is_empty() {
        writeln!(io::stderr(), "error: username must not be empty")?;
        std::process::exit(1);
    }

    let role = match args.role.trim().to_lowercase().as_str() {
        "admin" => "admin",
        "user" => "user",
        other => {
            writeln!(
                io::stderr(),
                "error: unsupported role '{other}'. Use 'user' or 'admin'."
            )?;
            std::process::exit(1);
        }
    };

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    let password_service = PasswordService::new()?;
    let password_hash = password_service.hash_password(&args.password)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO users
            (first_name, last_name, birth_date, username, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind("Provisioned")
    .bind("Account")
    .bind(chrono::NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date"))
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .execute(&pool)
    .await?
    .rows_affected();

    if inserted == 0 {
        writeln!(
            io::stderr(),
            "error: a user with that username or email already exists."
        )?;
        std::process::exit(1);
    }

    println!("created {role} account '{username}' <{email}>");
    Ok(())
}

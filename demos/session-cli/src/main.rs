//! `oa-session`: drives a file-backed OA session from the command line.
//!
//! Each invocation is a fresh process, so every command after `login`
//! exercises the rehydrate-from-storage path.
//!
//! ```text
//! oa-session login 5 --department 董事会 --leader 9
//! oa-session whoami
//! oa-session can boarder leader --mode '&'
//! oa-session logout
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use oa_auth::prelude::*;
use rand::Rng;

#[derive(Parser)]
#[command(name = "oa-session")]
#[command(about = "Inspect and drive the OA client session store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Session file (defaults to oa-session.json in the temp dir)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// JSON file with storage keys / board department overrides
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session for a user, replacing any existing one
    Login {
        /// User id (numeric ids are stored as numbers)
        uid: String,

        /// Department name
        #[arg(short, long)]
        department: Option<String>,

        /// Department leader's user id
        #[arg(short, long)]
        leader: Option<String>,

        /// Extra user attribute, as key=value (repeatable)
        #[arg(short, long = "attr", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,

        /// Use this token instead of minting a random one
        #[arg(short, long)]
        token: Option<String>,
    },

    /// End the session
    Logout,

    /// Show the current user, token and permission mask
    Whoami,

    /// Check permissions; exits 1 when the check fails
    Can {
        /// Required permissions: names (boarder, leader, all) or masks (1, 0b011)
        #[arg(required = true)]
        permissions: Vec<Permissions>,

        /// How to combine them: "|" (any) or "&" (all)
        #[arg(short, long, default_value = "|")]
        mode: Combine,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    oa_auth::init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };
    let store = cli
        .store
        .unwrap_or_else(|| std::env::temp_dir().join("oa-session.json"));
    let mut session = SessionStoreBuilder::new()
        .file(&store)
        .config(config)
        .build()?;

    match cli.command {
        Commands::Login {
            uid,
            department,
            leader,
            attrs,
            token,
        } => {
            let user = build_user(&uid, department, leader, attrs);
            let token = token.unwrap_or_else(mint_token);
            session.set_session(user, token)?;
            println!("signed in as {uid}");
            print_permissions(&mut session)?;
        }
        Commands::Logout => {
            session.clear_session()?;
            println!("signed out");
        }
        Commands::Whoami => {
            if !session.is_logged_in()? {
                println!("not signed in");
                return Ok(());
            }
            let (user, token) = session.session()?;
            println!("{}", serde_json::to_string_pretty(user)?);
            println!("token: {token}");
            print_permissions(&mut session)?;
        }
        Commands::Can { permissions, mode } => {
            let allowed = session.has_permission(&permissions, mode)?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded session config");
    Ok(config)
}

fn print_permissions(session: &mut DynSessionStore) -> Result<(), AuthError> {
    let own = session.own_permissions()?;
    let mut flags = Vec::new();
    if own.contains(Permissions::BOARDER) {
        flags.push("boarder");
    }
    if own.contains(Permissions::LEADER) {
        flags.push("leader");
    }
    if flags.is_empty() {
        flags.push("staff");
    }
    println!("permissions: {own} ({})", flags.join(", "));
    Ok(())
}

fn build_user(
    uid: &str,
    department: Option<String>,
    leader: Option<String>,
    attrs: Vec<(String, String)>,
) -> User {
    let mut user = User::new(parse_id(uid));
    if let Some(name) = department {
        let mut dept = Department::new(name);
        if let Some(leader) = leader {
            dept = dept.with_leader(parse_id(&leader));
        }
        user = user.with_department(dept);
    }
    for (key, value) in attrs {
        user = user.with_attribute(key, value);
    }
    user
}

/// Numeric-looking ids become numbers, everything else stays text, so
/// `--leader 5` matches a user created with uid `5`.
fn parse_id(raw: &str) -> UserId {
    raw.parse::<i64>()
        .map(UserId::Number)
        .unwrap_or_else(|_| UserId::from(raw))
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

/// Stands in for the token a real login endpoint would return: 32 hex
/// characters (128 random bits).
fn mint_token() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

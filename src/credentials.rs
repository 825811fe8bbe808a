//! Credential resolution for the check binaries
//!
//! Credentials either come verbatim from the command line or from a
//! `.pgpass`-style file (`hostname:port:database:username:password` per
//! line). The two sources are mutually exclusive per invocation: a configured
//! file path overrides the direct fields. SSL mode always comes from the
//! direct configuration.

use tracing::{instrument, trace, warn};

use crate::config::ConnectionConfig;
use crate::error::{CheckError, CheckResult};

/// Everything needed to open a connection to the target server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub sslmode: String,
}

/// One record from a pgpass file. The port stays textual here; it is parsed
/// when the entry is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassFileEntry {
    pub hostname: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

/// Derive connection credentials from the configuration.
///
/// When a pgpass file is configured, every entry is read and the values of
/// the *last* entry win. No hostname/port/database matching is performed;
/// this mirrors the long-standing behavior of the check and is covered by
/// tests, so it is not silently "corrected" here.
#[instrument(skip_all)]
pub fn resolve(config: &ConnectionConfig) -> CheckResult<Credentials> {
    let Some(path) = &config.pgpass else {
        return Ok(Credentials {
            user: config.user.clone(),
            password: config.password.clone(),
            host: config.hostname.clone(),
            port: config.port,
            database: config.database.clone(),
            sslmode: config.sslmode.clone(),
        });
    };

    let contents =
        std::fs::read_to_string(path).map_err(|e| CheckError::PassFileUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let entries = parse_passfile(&contents);
    trace!("parsed {} pgpass entries from {}", entries.len(), path.display());

    let mut credentials = Credentials {
        user: String::new(),
        password: String::new(),
        host: String::new(),
        port: 0,
        database: String::new(),
        sslmode: config.sslmode.clone(),
    };

    for entry in entries {
        credentials.user = entry.username;
        credentials.password = entry.password;
        credentials.host = entry.hostname;
        credentials.port = entry.port.parse().unwrap_or_else(|_| {
            warn!("pgpass entry has non-numeric port {:?}, falling back to 0", entry.port);
            0
        });
        credentials.database = entry.database;
    }

    Ok(credentials)
}

/// Parse the contents of a pgpass file.
///
/// Blank lines and `#` comments are skipped. Missing trailing fields are
/// tolerated as empty strings so a short line never aborts the whole file.
pub fn parse_passfile(contents: &str) -> Vec<PassFileEntry> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let mut fields = split_fields(line).into_iter();
            PassFileEntry {
                hostname: fields.next().unwrap_or_default(),
                port: fields.next().unwrap_or_default(),
                database: fields.next().unwrap_or_default(),
                username: fields.next().unwrap_or_default(),
                password: fields.next().unwrap_or_default(),
            }
        })
        .collect()
}

/// Split one pgpass line on unescaped colons. A backslash escapes the
/// following character, so `\:` and `\\` survive inside fields.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

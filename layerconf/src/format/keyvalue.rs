//! Line-oriented `KEY=VALUE` parsing (dotenv-style files).

use super::Entries;

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and lines starting with `#` are skipped, as are lines without
/// an `=` or with an empty key. Keys are uppercased and may carry a leading
/// `export `. One layer of matching quotes is removed from the value.
///
/// # Examples
///
/// ```
/// use layerconf::format::parse_key_value;
///
/// let entries = parse_key_value("# database\nexport db_host = \"localhost\"\nDB_PORT=5432\n");
/// assert_eq!(
///     entries,
///     vec![
///         ("DB_HOST".to_string(), "localhost".to_string()),
///         ("DB_PORT".to_string(), "5432".to_string()),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_key_value(content: &str) -> Entries {
    let mut entries = Entries::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let key = key.strip_prefix("export ").map_or(key, str::trim);
        if key.is_empty() {
            continue;
        }

        entries.push((key.to_uppercase(), unquote(value.trim()).to_string()));
    }

    entries
}

/// Removes one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

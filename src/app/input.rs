//! Line-oriented input for the interactive `browse` loop.
//!
//! Each line is one command; the first word selects it and the rest is the
//! argument. Unknown words and malformed arguments produce a message for the
//! user instead of an event.
//!
//! ```text
//! search rust developer @ Berlin     query + location in one submit
//! q <text> | loc <text>              set one field (empty clears it)
//! skill <name>                       toggle a skill tag
//! type <full-time|part-time|contract|remote|any>
//! salary <amount>                    80000, 80,000, $80k
//! job <id> | company <id>           open a single record
//! clear | jobs | companies | login | logout | quit | help
//! ```

use super::filters::JobType;
use super::handler::Event;
use super::routes::Route;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed this event to the controller.
    Dispatch(Event),
    /// Print the command summary.
    Help,
}

/// Parses one line of user input.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns a user-facing message for unknown commands and bad arguments.
///
/// # Examples
///
/// ```
/// use jobboard::app::input::{parse_command, Command};
/// use jobboard::app::Event;
///
/// let command = parse_command("search rust @ Berlin").unwrap();
/// assert_eq!(
///     command,
///     Some(Command::Dispatch(Event::Search { query: "rust".into(), location: "Berlin".into() }))
/// );
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => {
            let (query, location) = rest.split_once('@').unwrap_or((rest, ""));
            Event::Search {
                query: query.trim().to_string(),
                location: location.trim().to_string(),
            }
        }
        "q" | "query" => Event::SetQuery(rest.to_string()),
        "loc" | "location" => Event::SetLocation(rest.to_string()),
        "skill" | "tag" => {
            if rest.is_empty() {
                return Err("usage: skill <name>".to_string());
            }
            Event::ToggleSkill(rest.to_string())
        }
        "type" => Event::SetJobType(rest.parse::<JobType>()?),
        "salary" => Event::SetSalaryCeiling(parse_amount(rest)?),
        "clear" => Event::ClearFilters,
        "jobs" => Event::Navigate(Route::Jobs),
        "companies" => Event::Navigate(Route::Companies),
        "job" | "open" => Event::Navigate(Route::JobDetail(parse_id(rest)?)),
        "company" => Event::Navigate(Route::CompanyDetail(parse_id(rest)?)),
        "login" => Event::Navigate(Route::Login),
        "logout" => Event::Logout,
        "quit" | "exit" => Event::Quit,
        "help" | "?" => return Ok(Some(Command::Help)),
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };

    Ok(Some(Command::Dispatch(event)))
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.trim().parse::<i64>().map_err(|_| format!("expected a numeric id, got {raw:?}"))
}

/// Parses a salary such as `80000`, `80,000`, `$80k` or `0`.
fn parse_amount(raw: &str) -> Result<u32, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    let (digits, multiplier) = cleaned
        .strip_suffix('k')
        .map_or((cleaned.as_str(), 1), |d| (d, 1000));

    digits
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| format!("invalid salary: {raw:?}"))
}

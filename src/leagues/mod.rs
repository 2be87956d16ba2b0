//! League converter
//!
//! Folds tabular player-profile files into one JSON document per league.
//! Repeated players are reduced field by field with [`prefer_later`], both
//! within a file and against the document already on disk.

mod merge;
mod profile;
mod reader;

pub use merge::{is_empty, prefer_later};
pub use profile::{lenient_int, player_key, player_profile};
pub use reader::{detect_delimiter, parse_table, read_table, Row};

use crate::config::LeagueConfig;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// League conversion errors
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for league conversion
pub type LeagueResult<T> = std::result::Result<T, LeagueError>;

/// Outcome of converting one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSummary {
    pub league: String,
    pub output: PathBuf,
    pub players: usize,
}

/// Display name of a league, from the `league_name` column or the file stem
///
/// `premier_league.csv` becomes `Premier League`.
pub fn league_name(rows: &[Row], path: &Path) -> String {
    if let Some(name) = rows
        .first()
        .and_then(|row| row.get("league_name"))
        .filter(|name| !name.is_empty())
    {
        return name.clone();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    title_case(&stem.replace('_', " "))
}

/// Uppercases every letter that follows an uncased character, lowercases the rest
///
/// `serie_a-femminile` style names become `Serie A-Femminile`, `ligue 1` stays
/// `Ligue 1`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_cased = false;

    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && after_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        after_cased = cased;
    }

    out
}

/// File-name id of a league: lowercase, spaces become underscores
pub fn league_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn fresh_document(league: &str, season: &str) -> Map<String, Value> {
    let mut document = Map::new();
    document.insert("league".to_string(), json!(league));
    document.insert("season".to_string(), json!(season));
    document.insert("players".to_string(), Value::Object(Map::new()));
    document
}

/// Loads an existing league document, falling back to a fresh one
///
/// A missing file or malformed JSON yields a fresh document.
fn load_document(path: &Path, league: &str, season: &str) -> LeagueResult<Map<String, Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(fresh_document(league, season));
        }
        Err(source) => {
            return Err(LeagueError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) | Err(_) => {
            warn!("Replacing malformed league file {}", path.display());
            Ok(fresh_document(league, season))
        }
    }
}

/// Converts one CSV/TSV file, merging into its league document
///
/// Returns None when the file has no data rows.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    config: &LeagueConfig,
) -> LeagueResult<Option<LeagueSummary>> {
    let rows = read_table(input)?;
    if rows.is_empty() {
        warn!("Empty file skipped: {}", input.display());
        return Ok(None);
    }

    let league = league_name(&rows, input);
    let output = output_dir.join(format!("{}.json", league_id(&league)));
    let mut document = load_document(&output, &league, &config.default_season)?;

    // a document without a players object gets an empty one
    let slot = document.entry("players").or_insert(Value::Null);
    let mut players = match std::mem::take(slot) {
        Value::Object(players) => players,
        _ => Map::new(),
    };

    let mut skipped = 0usize;
    for row in &rows {
        let Some(key) = player_key(row) else {
            skipped += 1;
            continue;
        };

        let profile = player_profile(row, &league);
        match players.get_mut(&key) {
            Some(existing) => {
                let previous = std::mem::take(existing);
                *existing = prefer_later(previous, profile);
            }
            None => {
                players.insert(key, profile);
            }
        }
    }

    if skipped > 0 {
        debug!("{} rows without a player name in {}", skipped, input.display());
    }

    let count = players.len();
    *slot = Value::Object(players);

    std::fs::create_dir_all(output_dir).map_err(|source| LeagueError::Write {
        path: output_dir.display().to_string(),
        source,
    })?;
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(&output, json).map_err(|source| LeagueError::Write {
        path: output.display().to_string(),
        source,
    })?;

    info!("{} -> {} players saved to {}", league, count, output.display());

    Ok(Some(LeagueSummary {
        league,
        output,
        players: count,
    }))
}

fn is_table_file(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("csv") | Some("txt")
        )
}

/// Converts a file, or every `.csv`/`.txt` file of a directory in name order
pub fn convert_path(
    input: &Path,
    output_dir: &Path,
    config: &LeagueConfig,
) -> LeagueResult<Vec<LeagueSummary>> {
    if !input.is_dir() {
        return Ok(convert_file(input, output_dir, config)?.into_iter().collect());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(input)
        .map_err(|source| LeagueError::Read {
            path: input.display().to_string(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_table_file(path))
        .collect();
    files.sort();

    let mut summaries = Vec::new();
    for file in files {
        if let Some(summary) = convert_file(&file, output_dir, config)? {
            summaries.push(summary);
        }
    }

    info!("All leagues processed ({} files)", summaries.len());
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config() -> LeagueConfig {
        LeagueConfig::default()
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_league_name_from_column_or_stem() {
        let row: Row = [("league_name".to_string(), "LaLiga".to_string())].into();
        assert_eq!(league_name(&[row], Path::new("x.csv")), "LaLiga");

        let blank: Row = [("league_name".to_string(), String::new())].into();
        assert_eq!(
            league_name(&[blank], Path::new("data/premier_league.csv")),
            "Premier League"
        );
        assert_eq!(league_name(&[], Path::new("SERIE_a.txt")), "Serie A");
    }

    #[test]
    fn test_title_case_restarts_after_any_uncased_char() {
        assert_eq!(title_case("serie a-femminile"), "Serie A-Femminile");
        assert_eq!(title_case("o'higgins cup"), "O'Higgins Cup");
        assert_eq!(title_case("2nd BUNDESLIGA"), "2Nd Bundesliga");
        assert_eq!(
            league_name(&[], Path::new("serie_a-femminile.csv")),
            "Serie A-Femminile"
        );
    }

    #[test]
    fn test_league_id() {
        assert_eq!(league_id("Premier League"), "premier_league");
        assert_eq!(league_id("LaLiga"), "laliga");
    }

    #[test]
    fn test_convert_file_writes_document() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("premier_league.csv");
        std::fs::write(
            &input,
            "player_name,age,current_club_name\nBukayo Saka,22,Arsenal\n,30,Nobody\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let summary = convert_file(&input, &out, &config()).unwrap().unwrap();
        assert_eq!(summary.league, "Premier League");
        assert_eq!(summary.players, 1);
        assert_eq!(summary.output, out.join("premier_league.json"));

        let doc = read_json(&summary.output);
        assert_eq!(doc["league"], "Premier League");
        assert_eq!(doc["season"], "2024/2025");
        let saka = &doc["players"]["bukayo_saka"];
        assert_eq!(saka["1_identitas_informasi_pribadi"]["usia"], 22);
        assert_eq!(saka["3_data_klub_kontrak"]["klub_saat_ini"], "Arsenal");
    }

    #[test]
    fn test_repeated_rows_prefer_later_non_empty() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("eredivisie.txt");
        std::fs::write(
            &input,
            "player_name\tage\tfoot\nXavi Simons\t20\tright\nXavi Simons\t21\t\n",
        )
        .unwrap();

        let summary = convert_file(&input, dir.path(), &config()).unwrap().unwrap();
        let doc = read_json(&summary.output);
        let identity = &doc["players"]["xavi_simons"]["1_identitas_informasi_pribadi"];
        assert_eq!(identity["usia"], 21);
        assert_eq!(identity["kaki_dominan"], "right");
    }

    #[test]
    fn test_merges_with_existing_document() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ligue_1.csv");
        std::fs::write(&input, "player_name,foot\nKylian Mbappe,\n").unwrap();

        let existing = json!({
            "league": "Ligue 1",
            "season": "2023/2024",
            "players": {
                "kylian_mbappe": {"1_identitas_informasi_pribadi": {"kaki_dominan": "right"}},
                "other_player": {"note": "kept"}
            }
        });
        std::fs::write(dir.path().join("ligue_1.json"), existing.to_string()).unwrap();

        let summary = convert_file(&input, dir.path(), &config()).unwrap().unwrap();
        assert_eq!(summary.players, 2);

        let doc = read_json(&summary.output);
        assert_eq!(doc["season"], "2023/2024");
        assert_eq!(
            doc["players"]["kylian_mbappe"]["1_identitas_informasi_pribadi"]["kaki_dominan"],
            "right"
        );
        assert_eq!(doc["players"]["other_player"]["note"], "kept");
    }

    #[test]
    fn test_malformed_document_is_replaced() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("mls.csv");
        std::fs::write(&input, "player_name,age\nLionel Messi,36\n").unwrap();
        std::fs::write(dir.path().join("mls.json"), "{ not json").unwrap();

        let summary = convert_file(&input, dir.path(), &config()).unwrap().unwrap();
        let doc = read_json(&summary.output);
        assert_eq!(doc["league"], "Mls");
        assert_eq!(summary.players, 1);
    }

    #[test]
    fn test_document_without_players_gets_empty_map() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("mls.csv");
        std::fs::write(&input, "player_name\nLionel Messi\n").unwrap();
        std::fs::write(dir.path().join("mls.json"), r#"{"league": "Mls"}"#).unwrap();

        let summary = convert_file(&input, dir.path(), &config()).unwrap().unwrap();
        assert_eq!(summary.players, 1);
    }

    #[test]
    fn test_empty_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty.csv");
        std::fs::write(&input, "player_name,age\n").unwrap();

        assert!(convert_file(&input, dir.path(), &config()).unwrap().is_none());
        assert!(!dir.path().join("empty.json").exists());
    }

    #[test]
    fn test_convert_directory_in_name_order() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("b_league.csv"), "player_name\nB One\n").unwrap();
        std::fs::write(input.join("a_league.txt"), "player_name\nA One\n").unwrap();
        std::fs::write(input.join("notes.md"), "player_name\nIgnored\n").unwrap();

        let summaries = convert_path(&input, &dir.path().join("out"), &config()).unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.league.as_str()).collect();
        assert_eq!(names, vec!["A League", "B League"]);
    }
}

//! Loaders that turn the on-disk data files into the validated domain types
//! `retro_core` consumes. File format knowledge, parsing, and
//! cross-referencing (eligibility CSV against player JSON) live here so the
//! core model stays pure.

pub mod eligibility_updates;
pub mod error;
pub mod file;
pub mod filter;
pub mod players;
pub mod positions;
pub mod rounds;
pub mod rules;

pub use error::LoadError;
pub use filter::{load_data_filter, DataFilter};
pub use players::{load_players_from_json, PlayerLoadOptions};
pub use rounds::load_rounds_from_json;
pub use rules::load_team_rules_from_json;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("retro_data_test_{}_{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_players_with_default_scores_and_prices() {
        let path = write_temp(
            "players.json",
            r#"[
                {
                    "id": 1,
                    "first_name": "Marcus",
                    "last_name": "Bontempelli",
                    "squad_id": 10,
                    "original_positions": [2],
                    "stats": { "scores": { "1": 120.0 }, "prices": { "1": 700000.0 } }
                }
            ]"#,
        );

        let (players, warnings) = load_players_from_json(&path, &PlayerLoadOptions::default()).unwrap();
        assert!(warnings.is_empty());
        let player = &players[&1];
        assert_eq!(player.by_round[&1].score, 120.0);
        assert_eq!(player.by_round[&1].price, 700_000.0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn squad_filter_excludes_players_outside_the_subset() {
        let path = write_temp(
            "players_squad.json",
            r#"[
                {"id": 1, "first_name": "A", "last_name": "A", "squad_id": 10, "original_positions": [1], "stats": {}},
                {"id": 2, "first_name": "B", "last_name": "B", "squad_id": 20, "original_positions": [1], "stats": {}}
            ]"#,
        );

        let options = PlayerLoadOptions {
            squad_id_filter: Some(HashSet::from([10])),
            ..Default::default()
        };
        let (players, _) = load_players_from_json(&path, &options).unwrap();
        assert!(players.contains_key(&1));
        assert!(!players.contains_key(&2));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn data_filter_returns_none_when_file_absent() {
        let path = std::env::temp_dir().join("retro_data_test_nonexistent_data_filter.json");
        std::fs::remove_file(&path).ok();
        assert_eq!(load_data_filter(&path).unwrap(), None);
    }
}

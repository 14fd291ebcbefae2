#[cfg(test)]
mod tests {
    use crate::config::ScorebookConfig;
    use crate::errors::{ReportError, ScorebookError, StoreError, StoreResult};
    use crate::export::{report_message, ReportGenerator, ReportRequest};
    use crate::scorebook::Scorebook;
    use crate::scoring::tests::common::test_scorebook;
    use crate::store::{MemoryStore, Store};
    use crate::team::{Player, TeamSide};
    use pretty_assertions::assert_eq;
    use schema::{Outcome, PitchMark};
    use serde_json::{json, Value};
    use std::cell::RefCell;

    #[test]
    fn test_switch_saves_then_loads_other_side() {
        let mut book = test_scorebook();
        book.rename_team("Visitors");
        book.record_pitch(0, 0, PitchMark::Ball).unwrap();

        book.switch_team(TeamSide::Home).unwrap();
        assert_eq!(book.active_side(), TeamSide::Home);
        assert_eq!(book.team().team_name, "Home");
        assert!(book.cell(0, 0).unwrap().is_empty());
        assert!(book.store().keys().contains(&"team_away"));

        book.switch_team(TeamSide::Away).unwrap();
        assert_eq!(book.team().team_name, "Visitors");
        assert_eq!(book.cell(0, 0).unwrap().pitch_sequence, vec![PitchMark::Ball]);
    }

    #[test]
    fn test_switch_to_same_side_is_noop() {
        let mut book = test_scorebook();
        book.switch_team(TeamSide::Away).unwrap();
        assert!(book.store().keys().is_empty());
    }

    #[test]
    fn test_both_sides_keep_their_edits() {
        let mut book = test_scorebook();
        book.select_outcome(0, 0, Outcome::HomeRun).unwrap();
        book.switch_team(TeamSide::Home).unwrap();
        book.add_player(0, Player::named("Leadoff"));
        book.select_outcome(0, 0, Outcome::Double).unwrap();
        book.switch_team(TeamSide::Away).unwrap();

        assert_eq!(book.box_score().total_runs, 1);
        book.switch_team(TeamSide::Home).unwrap();
        assert_eq!(book.team().players[0].name, "Leadoff");
        assert_eq!(book.team().players.len(), 10);
        assert_eq!(book.cell(0, 0).unwrap().base_reached, 2);
    }

    #[test]
    fn test_malformed_stored_team_is_normalized() {
        let mut store = MemoryStore::new();
        store
            .save(
                TeamSide::Home.store_key(),
                &json!({
                    "players": ["Ada", {"name": "Grace", "number": 7}, 42],
                    "grid": [[
                        {
                            "pitchSequence": ["Ball", "Nope", "Foul"],
                            "outcome": "Triple",
                            "baseReached": 1,
                            "outsRecorded": 9,
                            "runPath": [
                                {"from": 0, "to": 3, "kind": "Hit"},
                                {"from": 3, "to": 2, "kind": "Advance"}
                            ]
                        },
                        "garbage"
                    ]],
                    "inningOuts": [7]
                }),
            )
            .unwrap();

        let book = Scorebook::open(store, ScorebookConfig::default(), TeamSide::Home).unwrap();
        let team = book.team();
        assert_eq!(team.team_name, "Home");
        assert_eq!(team.players.len(), 2);
        assert_eq!(team.players[1].number, "7");

        let cell = book.cell(0, 0).unwrap();
        assert_eq!(cell.pitch_sequence, vec![PitchMark::Ball, PitchMark::Foul]);
        assert_eq!(cell.run_path.len(), 1);
        assert_eq!(cell.base_reached, 3);
        assert_eq!(cell.outs_recorded, 3);
        assert!(book.cell(0, 1).unwrap().is_empty());
        assert_eq!(book.grid().inning_outs()[0], 3);
    }

    /// Store whose saves always fail, for checking nothing changes.
    struct ReadOnlyStore {
        attempts: RefCell<usize>,
    }

    impl Store for ReadOnlyStore {
        fn load(&self, _key: &str) -> StoreResult<Option<Value>> {
            Ok(None)
        }

        fn save(&mut self, key: &str, _value: &Value) -> StoreResult<()> {
            *self.attempts.borrow_mut() += 1;
            Err(StoreError::Io {
                key: key.to_string(),
                path: "/read-only".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_failed_save_keeps_active_team() {
        let store = ReadOnlyStore {
            attempts: RefCell::new(0),
        };
        let mut book = Scorebook::open(store, ScorebookConfig::default(), TeamSide::Away).unwrap();
        book.record_pitch(0, 0, PitchMark::CalledStrike).unwrap();

        let result = book.switch_team(TeamSide::Home);
        assert!(matches!(result, Err(ScorebookError::Store(_))));
        assert_eq!(*book.store().attempts.borrow(), 1);
        assert_eq!(book.active_side(), TeamSide::Away);
        assert_eq!(book.cell(0, 0).unwrap().pitch_sequence.len(), 1);
    }

    #[test]
    fn test_export_document_shape() {
        let mut book = test_scorebook();
        book.select_outcome(0, 0, Outcome::Single).unwrap();

        let value = serde_json::to_value(book.export()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["grid", "innings", "players", "teamName"]);
        assert_eq!(object["innings"], json!([1, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert_eq!(object["grid"][0][0]["outcome"], json!("Single"));
        assert_eq!(object["grid"][0][0]["runPath"][0]["to"], json!(1));
    }

    struct FixedReport(Result<String, ReportError>);

    impl ReportGenerator for FixedReport {
        fn generate(&self, request: &ReportRequest) -> Result<String, ReportError> {
            assert_eq!(request.language, "ja");
            self.0.clone()
        }
    }

    #[test]
    fn test_report_failure_is_surfaced_without_side_effects() {
        let mut book = test_scorebook();
        book.select_outcome(0, 0, Outcome::Walk).unwrap();
        let before = book.export();

        let failing = FixedReport(Err(ReportError::Unavailable("offline".to_string())));
        let result = book.generate_report(&failing, "rain delay in the 3rd", "ja");
        assert!(result.is_err());
        assert!(report_message(&result).contains("offline"));
        assert_eq!(book.export(), before);

        let working = FixedReport(Ok("Away walked early.".to_string()));
        let result = book.generate_report(&working, "", "ja");
        assert_eq!(report_message(&result), "Away walked early.");
    }
}

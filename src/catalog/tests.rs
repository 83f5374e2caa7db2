use super::*;
use crate::error::WorkflowError;

#[test]
fn test_embedded_catalog_loads() {
    let catalog = StageCatalog::load().unwrap();
    assert_eq!(catalog.stages().len(), 10);
    assert_eq!(catalog.stages()[0].code, "stage_1_marking");
    assert_eq!(catalog.stages()[9].code, "stage_10_handover");
}

#[test]
fn test_photo_bounds_hold_for_every_stage() {
    let catalog = StageCatalog::load().unwrap();
    for stage in catalog.stages() {
        let req = &stage.requirements;
        if let Some(max) = req.max_photos {
            assert!(
                req.min_photos <= max,
                "stage {}: min_photos > max_photos",
                stage.code
            );
        }
    }
}

#[test]
fn test_every_successor_resolves() {
    let catalog = StageCatalog::load().unwrap();
    for stage in catalog.stages() {
        let successors = catalog.next_stages(&stage.code).unwrap();
        assert_eq!(successors.len(), stage.next_stages.len());
    }
}

#[test]
fn test_every_stage_has_all_five_languages() {
    let catalog = StageCatalog::load().unwrap();
    for stage in catalog.stages() {
        for lang in ["en", "de", "ru", "uz", "tr"] {
            assert!(
                stage.name.contains_key(lang),
                "stage {} missing name[{lang}]",
                stage.code
            );
            assert!(
                stage.description.contains_key(lang),
                "stage {} missing description[{lang}]",
                stage.code
            );
        }
    }
}

#[test]
fn test_display_name_falls_back_to_english() {
    let catalog = StageCatalog::load().unwrap();
    let stage = catalog.get("stage_1_marking").unwrap();
    assert_eq!(stage.display_name("de"), "Markierung");
    assert_eq!(stage.display_name("xx"), "Marking");
}

#[test]
fn test_get_unknown_code_is_not_found() {
    let catalog = StageCatalog::load().unwrap();
    let result = catalog.get("stage_99_bogus");
    assert!(matches!(
        result,
        Err(WorkflowError::StageNotFound { code }) if code == "stage_99_bogus"
    ));
}

#[test]
fn test_entry_points_are_the_unreferenced_active_stages() {
    let catalog = StageCatalog::load().unwrap();
    let entry_points: Vec<_> = catalog.entry_points().iter().map(|s| s.code.clone()).collect();
    assert_eq!(entry_points, vec!["stage_1_marking"]);
}

#[test]
fn test_available_stages_without_current_returns_entry_points() {
    let catalog = StageCatalog::load().unwrap();
    let available = catalog.available_stages("proj-1", None).unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].code, "stage_1_marking");
}

#[test]
fn test_available_stages_follows_successors() {
    let catalog = StageCatalog::load().unwrap();
    let available = catalog
        .available_stages("proj-1", Some("stage_1_marking"))
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].code, "stage_2_excavation");
}

#[test]
fn test_available_stages_filters_inactive_successors() {
    let mut table = parse_embedded();
    table
        .stages
        .iter_mut()
        .find(|s| s.code == "stage_2_excavation")
        .unwrap()
        .is_active = false;
    let catalog = StageCatalog::from_table(table).unwrap();

    let available = catalog
        .available_stages("proj-1", Some("stage_1_marking"))
        .unwrap();
    assert!(available.is_empty());
}

#[test]
fn test_terminal_stage_has_no_successors() {
    let catalog = StageCatalog::load().unwrap();
    let handover = catalog.get("stage_10_handover").unwrap();
    assert!(handover.is_terminal());
    assert!(catalog.next_stages("stage_10_handover").unwrap().is_empty());
}

#[test]
fn test_dangling_successor_is_rejected_at_load() {
    let mut table = parse_embedded();
    table.stages[0].next_stages = vec!["stage_nowhere".to_string()];

    let result = StageCatalog::from_table(table);
    match result {
        Err(WorkflowError::InvalidCatalog(issues)) => {
            assert!(issues
                .iter()
                .any(|i| i.message.contains("stage_nowhere")
                    && i.stage_code.as_deref() == Some("stage_1_marking")));
        }
        other => panic!("expected InvalidCatalog, got {other:?}"),
    }
}

#[test]
fn test_cycle_is_rejected_at_load() {
    let mut table = parse_embedded();
    // Point the terminal stage back at the first one
    table
        .stages
        .iter_mut()
        .find(|s| s.code == "stage_10_handover")
        .unwrap()
        .next_stages = vec!["stage_1_marking".to_string()];

    let result = StageCatalog::from_table(table);
    match result {
        Err(WorkflowError::InvalidCatalog(issues)) => {
            assert!(issues
                .iter()
                .any(|i| i.message.contains("Circular stage progression")));
        }
        other => panic!("expected InvalidCatalog, got {other:?}"),
    }
}

#[test]
fn test_duplicate_codes_are_rejected() {
    let mut table = parse_embedded();
    let duplicate = table.stages[0].clone();
    table.stages.push(duplicate);

    let result = StageCatalog::from_table(table);
    match result {
        Err(WorkflowError::InvalidCatalog(issues)) => {
            assert!(issues.iter().any(|i| i.message.contains("Duplicate")));
        }
        other => panic!("expected InvalidCatalog, got {other:?}"),
    }
}

#[test]
fn test_inverted_photo_bounds_are_rejected() {
    let mut table = parse_embedded();
    table.stages[0].requirements.min_photos = 9;
    table.stages[0].requirements.max_photos = Some(2);

    let result = StageCatalog::from_table(table);
    assert!(matches!(result, Err(WorkflowError::InvalidCatalog(_))));
}

#[test]
fn test_self_successor_is_rejected() {
    let mut table = parse_embedded();
    table.stages[0].next_stages = vec!["stage_1_marking".to_string()];

    let result = StageCatalog::from_table(table);
    match result {
        Err(WorkflowError::InvalidCatalog(issues)) => {
            assert!(issues.iter().any(|i| i.message.contains("itself")));
        }
        other => panic!("expected InvalidCatalog, got {other:?}"),
    }
}

#[test]
fn test_unsupported_version_is_rejected() {
    let mut table = parse_embedded();
    table.version = 2;
    assert!(matches!(
        StageCatalog::from_table(table),
        Err(WorkflowError::InvalidCatalog(_))
    ));
}

#[test]
fn test_malformed_yaml_is_invalid_catalog() {
    let result = StageCatalog::from_yaml("version: [not, a, number]");
    assert!(matches!(result, Err(WorkflowError::InvalidCatalog(_))));
}

#[test]
fn test_time_windows_parse_from_yaml() {
    let yaml = r#"
version: 1
stages:
  - code: stage_1_night_work
    name:
      en: Night Work
    description:
      en: Work restricted to daytime
    requirements:
      min_photos: 0
      time_of_day_restrictions:
        - start_time: "22:00"
          end_time: "06:00"
          reason: Residential noise curfew
          days_of_week: [1, 2, 3, 4, 5]
    next_stages: []
    estimated_duration_minutes: 45
"#;
    let catalog = StageCatalog::from_yaml(yaml).unwrap();
    let stage = catalog.get("stage_1_night_work").unwrap();
    let window = &stage.requirements.time_of_day_restrictions[0];
    assert_eq!(window.start_time.format("%H:%M").to_string(), "22:00");
    assert_eq!(window.end_time.format("%H:%M").to_string(), "06:00");
    assert_eq!(window.days_of_week.as_deref(), Some(&[1, 2, 3, 4, 5][..]));
}

fn parse_embedded() -> StageTable {
    serde_yaml::from_str(include_str!("stages.yaml")).unwrap()
}

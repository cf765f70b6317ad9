use fp_core::ReachId;
use fp_project::*;

const EXAMPLE: &str = r#"
version: 1
name: Example Creek
network:
  edges:
    - {from: 2, to: 1}
    - {from: 3, to: 2}
    - {from: 4, to: 3}
    - {from: 5, to: 3}
    - {from: 6, to: 4}
restrictions:
  - {reach: 2, id: dam-a}
  - {reach: "4"}
origins: [2]
splitting:
  type: Proportional
  attribute: discharge
  values:
    - {reach: 4, value: 30.0}
    - {reach: 5, value: 10.0}
parameters:
  pass_rate: 50
"#;

fn temp_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("fp_project_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn parses_mixed_integer_and_string_ids() {
    let study = from_yaml_str(EXAMPLE).unwrap();
    assert_eq!(study.name, "Example Creek");
    assert_eq!(study.network.edges.len(), 5);
    assert_eq!(study.restrictions[0].reach, ReachId::from(2));
    assert_eq!(study.restrictions[1].reach, ReachId::from(4));
    assert_eq!(study.restrictions[0].id.as_deref(), Some("dam-a"));
    assert_eq!(study.parameters.pass_rate, 50.0);
    assert_eq!(study.parameters.cutoff, 1.0);
    assert_eq!(study.origin_source(), OriginSource::Explicit);
    match &study.splitting {
        SplittingDef::Proportional { attribute, values } => {
            assert_eq!(attribute.as_deref(), Some("discharge"));
            assert_eq!(values.len(), 2);
        }
        SplittingDef::None => panic!("expected proportional splitting"),
    }
}

#[test]
fn splitting_defaults_to_none() {
    let yaml = r#"
name: Plain
network:
  edges: [{from: b, to: a}]
restrictions: [{reach: b}]
main_stems: [a]
"#;
    let study = from_yaml_str(yaml).unwrap();
    assert_eq!(study.version, LATEST_VERSION);
    assert_eq!(study.splitting, SplittingDef::None);
    assert_eq!(study.origin_source(), OriginSource::MainStems);
}

#[test]
fn yaml_roundtrip() {
    let study = from_yaml_str(EXAMPLE).unwrap();
    let path = temp_path("roundtrip.yaml");
    save_yaml(&path, &study).unwrap();
    let loaded = load_study(&path).unwrap();
    assert_eq!(loaded, study);
}

#[test]
fn json_roundtrip() {
    let study = from_yaml_str(EXAMPLE).unwrap();
    let path = temp_path("roundtrip.json");
    save_json(&path, &study).unwrap();
    let loaded = load_study(&path).unwrap();
    assert_eq!(loaded, study);
}

#[test]
fn missing_restrictions_fail_validation() {
    let yaml = r#"
name: Free flowing
network:
  edges: [{from: 2, to: 1}]
origins: [1]
"#;
    let err = from_yaml_str(yaml).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::Empty { .. })
    ));
}

#[test]
fn future_version_is_rejected() {
    let yaml = r#"
version: 99
name: Future
network:
  edges: [{from: 2, to: 1}]
restrictions: [{reach: 2}]
origins: [1]
"#;
    let err = from_yaml_str(yaml).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::UnsupportedVersion { version: 99 })
    ));
}

#[test]
fn unknown_splitting_type_is_a_parse_error() {
    let yaml = r#"
name: Bad
network:
  edges: [{from: 2, to: 1}]
restrictions: [{reach: 2}]
origins: [1]
splitting: {type: Random}
"#;
    assert!(matches!(from_yaml_str(yaml), Err(ProjectError::Yaml(_))));
}

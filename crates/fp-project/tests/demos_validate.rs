use std::path::PathBuf;

#[test]
fn demo_studies_validate() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    for rel in ["demos/example_creek.yaml"] {
        let path = root.join(rel);
        let result = fp_project::load_study(&path);
        assert!(
            result.is_ok(),
            "demo failed validation: {} => {:?}",
            path.display(),
            result.err()
        );
    }
}

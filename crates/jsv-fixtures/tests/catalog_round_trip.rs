//! Every catalog fixture must survive the validator it is generated for,
//! and the generated manifest must drive a clean batch run.

use jsv_fixtures::{generate, reference_fixtures, GeneratorConfig, DRAFT7_URI};
use jsv_schema::{exit_code_for_batch, BatchValidator, Manifest, SchemaValidationService};

#[test]
fn every_fixture_is_a_valid_draft7_schema() {
    let service = SchemaValidationService::draft7();
    for fixture in reference_fixtures().unwrap() {
        let document = fixture.shape.to_document();
        assert_eq!(document["$schema"], DRAFT7_URI, "{}", fixture.name);
        let result = service.validate(&document, fixture.name);
        assert!(result.valid, "{} rejected: {:?}", fixture.name, result.errors);
    }
}

#[test]
fn generated_manifest_validates_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::in_dir(dir.path().join("reference-schemas"));
    let service = SchemaValidationService::draft7();
    let fixtures = reference_fixtures().unwrap();

    let report = generate(&fixtures, &config, &service).unwrap();
    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert_eq!(report.successful(), fixtures.len());

    let manifest = Manifest::load(&config.manifest_path).unwrap();
    assert_eq!(manifest.len(), fixtures.len());
    let batch = BatchValidator::for_manifest(&service, &config.manifest_path)
        .run(&manifest, "reference-config.json");
    assert_eq!(batch.summary().valid, fixtures.len());
    assert_eq!(exit_code_for_batch(&batch), 0);
}

#[test]
fn nullable_fixture_accepts_null_branch() {
    let fixtures = reference_fixtures().unwrap();
    let nullable = fixtures.iter().find(|f| f.name == "string-nullable").unwrap();
    let schema = nullable.shape.to_schema();
    assert_eq!(schema["anyOf"][1]["type"], "null");
}

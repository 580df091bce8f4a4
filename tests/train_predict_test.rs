//! End-to-end tests: CSV dataset → trained artifact → predictions.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use veraz::error::{Result, VerazError};
use veraz::ml::{
    ClassifierKind, ClassifierPipeline, InferenceService, Trainer, TrainerConfig, Verdict, train,
};

const FAKE: &[&str] = &[
    "URGENTE: compartan este milagro antes de que lo borren",
    "El secreto que el gobierno oculta: cura milagrosa para todo",
    "Conspiración revelada, los medios ocultan la verdad, compartan ya",
    "Milagro increíble: agua que cura el cáncer en tres días",
    "Urgente, alerta máxima, compartan con todos sus contactos",
    "Lo que no quieren que sepas: el secreto de la eterna juventud",
    "Descubren conspiración secreta para controlar la mente",
    "Compartan urgente: alerta por microchips ocultos en vacunas",
    "Milagro oculto por las farmacéuticas, la verdad revelada",
    "Increíble secreto: los políticos ocultan extraterrestres",
    "Urgente: milagro viral que los medios ocultan",
    "Alerta conspiración: compartan antes de que censuren",
];

const CREDIBLE: &[&str] = &[
    "El ministerio publicó el informe oficial de empleo del trimestre",
    "Según datos oficiales, la inflación se mantuvo estable en marzo",
    "La universidad presentó un estudio revisado por pares sobre el clima",
    "El banco central publicó su informe anual de estabilidad financiera",
    "El instituto de estadística publicó datos del censo nacional",
    "Un estudio oficial analiza el consumo eléctrico de los hogares",
    "El ministerio de salud informó datos de vacunación por región",
    "La comisión publicó el informe técnico sobre calidad del agua",
    "Investigadores publicaron un estudio sobre la producción agrícola",
    "El parlamento aprobó el presupuesto tras el informe de la comisión",
    "Datos oficiales muestran un aumento moderado de las exportaciones",
    "El estudio del instituto fue publicado en una revista científica",
];

fn write_dataset(dir: &Path, rows: &[(&str, &str)]) -> std::path::PathBuf {
    let path = dir.join("dataset.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["Text", "class"]).unwrap();
    for (text, label) in rows {
        writer.write_record([*text, *label]).unwrap();
    }
    writer.flush().unwrap();
    path
}

fn full_dataset() -> Vec<(&'static str, &'static str)> {
    let mut rows = Vec::new();
    for (fake, credible) in FAKE.iter().zip(CREDIBLE) {
        rows.push((*fake, "FALSE"));
        rows.push((*credible, "TRUE"));
    }
    rows
}

#[test]
fn test_train_then_predict() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path(), &full_dataset());
    let model = dir.path().join("model.json");

    let report = train(&dataset, &model)?;
    assert!(report.stratified);
    assert_eq!(report.train_size + report.test_size, 24);
    assert_eq!(report.test_size, 5);
    assert_eq!(report.classifier, ClassifierKind::Logistic);
    assert!(report.evaluation.roc_auc.is_some());
    assert_eq!(report.model_path.as_deref(), Some(model.as_path()));
    assert!(model.exists());

    let service = InferenceService::load(&model)?;
    let fake = service.predict("URGENTE: un milagro secreto que ocultan, compartan ya");
    let credible = service.predict("El ministerio publicó un informe oficial con datos del estudio");

    assert!(fake.probability_of_fake > credible.probability_of_fake);
    assert_eq!(fake.label, Verdict::Fake);
    assert_eq!(credible.label, Verdict::Credible);
    assert!((0.0..=1.0).contains(&fake.probability_of_fake));

    Ok(())
}

#[test]
fn test_training_is_reproducible() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path(), &full_dataset());

    let first = train(&dataset, dir.path().join("a.json"))?;
    let second = train(&dataset, dir.path().join("b.json"))?;
    assert_eq!(first.evaluation, second.evaluation);

    let a = ClassifierPipeline::load(dir.path().join("a.json"))?;
    let b = ClassifierPipeline::load(dir.path().join("b.json"))?;
    assert_eq!(a.vectorizer(), b.vectorizer());
    assert_eq!(a.classifier(), b.classifier());

    Ok(())
}

#[test]
fn test_tiny_dataset_trains() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let rows = [
        ("URGENTE compren ya o moriran todos", "fake"),
        ("Texto neutral sobre el clima", "real"),
        ("Milagro secreto que ocultan", "0"),
        ("Informe oficial del ministerio", "1"),
    ];
    let dataset = write_dataset(dir.path(), &rows);
    let model = dir.path().join("model.json");

    let report = train(&dataset, &model)?;
    assert!(!report.stratified);
    assert_eq!(report.test_fraction, 0.5);
    assert_eq!(report.test_size, 2);
    assert_eq!(report.train_size, 2);

    let prediction = InferenceService::load(&model)?.predict("cualquier cosa");
    assert!((0.0..=1.0).contains(&prediction.probability_of_fake));

    Ok(())
}

#[test]
fn test_tiny_dataset_with_single_fake_row_trains() -> Result<()> {
    let credible = [
        "El ministerio publicó el informe oficial",
        "La universidad presentó un estudio revisado",
        "Datos oficiales del censo nacional",
        "El banco central mantuvo la tasa",
        "El parlamento aprobó el presupuesto anual",
    ];

    for fake_position in 0..=credible.len() {
        let dir = TempDir::new().unwrap();
        let mut rows: Vec<(&str, &str)> = credible.iter().map(|text| (*text, "REAL")).collect();
        rows.insert(fake_position, ("URGENTE milagro secreto, compartan ya", "FAKE"));
        let dataset = write_dataset(dir.path(), &rows);
        let model = dir.path().join("model.json");

        let report = train(&dataset, &model)?;
        assert!(!report.stratified);
        assert_eq!(report.test_fraction, 0.5);
        assert_eq!(report.train_size, 3);
        assert_eq!(report.test_size, 3);

        let fake_in_test = report.evaluation.fake.support == 1;
        assert_eq!(report.evaluation.roc_auc.is_some(), fake_in_test);

        let prediction = InferenceService::load(&model)?.predict("milagro secreto del gobierno");
        assert!((0.0..=1.0).contains(&prediction.probability_of_fake));
    }

    Ok(())
}

#[test]
fn test_centroid_classifier_end_to_end() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path(), &full_dataset());
    let model = dir.path().join("model.json");

    let mut config = TrainerConfig::default();
    config.pipeline.classifier = ClassifierKind::Centroid;
    let report = Trainer::new(config).train(&dataset, &model)?;
    assert!(report.evaluation.roc_auc.is_some());

    let service = InferenceService::load(&model)?;
    assert!(!service.supports_probability());
    let p = service.predict("urgente milagro secreto").probability_of_fake;
    assert!(p == 0.0 || p == 1.0);

    Ok(())
}

#[test]
fn test_missing_columns_write_nothing() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("dataset.csv");
    fs::write(&dataset, "titulo,etiqueta\nhola,TRUE\n").unwrap();
    let model = dir.path().join("model.json");

    let err = train(&dataset, &model).unwrap_err();
    assert!(matches!(err, VerazError::Schema(_)));
    assert!(!model.exists());
}

#[test]
fn test_unmappable_labels_are_all_reported() {
    let dir = TempDir::new().unwrap();
    let mut rows = full_dataset();
    rows.push(("texto dudoso", "MAYBE"));
    rows.push(("otro texto", "unknown"));
    rows.push(("más texto", "maybe"));
    let dataset = write_dataset(dir.path(), &rows);
    let model = dir.path().join("model.json");

    match train(&dataset, &model) {
        Err(VerazError::UnmappableLabels { values, .. }) => {
            assert_eq!(values, vec!["MAYBE".to_string(), "UNKNOWN".to_string()]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!model.exists());
}

#[test]
fn test_missing_dataset_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = train(dir.path().join("absent.csv"), dir.path().join("model.json")).unwrap_err();
    assert!(matches!(err, VerazError::Io(_)));
}

#[test]
fn test_load_rejects_foreign_artifact() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("model.pkl");
    fs::write(&model, r#"{"format":"pickle","version":4}"#).unwrap();

    let err = InferenceService::load(&model).unwrap_err();
    assert!(matches!(err, VerazError::Model(_)));

    let err = InferenceService::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, VerazError::ModelNotFound(_)));
}

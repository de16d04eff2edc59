//! Building the session store from command-line configuration.

use crate::DataArgs;
use log::info;
use std::path::Path;
use wpv_data::CatalogOptions;
use wpv_db::Database;

/// Open the configured store.
///
/// `--database` wins over `--data-dir`. A data directory must contain
/// `wells.csv`; the type, production and injection exports are optional.
pub fn open_store(args: &DataArgs) -> anyhow::Result<Database> {
    if let Some(path) = &args.database {
        return Database::open_read_only(path);
    }
    match &args.data_dir {
        Some(dir) => load_data_dir(dir),
        None => anyhow::bail!("no data configured: pass --database or --data-dir"),
    }
}

/// Load the CSV exports in `dir` into a fresh in-memory database.
pub fn load_data_dir(dir: &Path) -> anyhow::Result<Database> {
    let wells_path = dir.join("wells.csv");
    if !wells_path.exists() {
        anyhow::bail!("{} not found", wells_path.display());
    }

    let db = Database::new()?;
    db.load_wells(&std::fs::read_to_string(&wells_path)?)?;

    let optional: [(&str, fn(&Database, &str) -> anyhow::Result<()>); 3] = [
        ("well_types.csv", Database::load_well_types),
        ("production.csv", Database::load_production),
        ("injection.csv", Database::load_injection),
    ];
    for (name, load) in optional {
        let path = dir.join(name);
        if !path.exists() {
            info!("[WPV] store: {} not present, skipping", path.display());
            continue;
        }
        load(&db, &std::fs::read_to_string(&path)?)?;
    }
    Ok(db)
}

pub fn catalog_options(args: &DataArgs) -> CatalogOptions {
    CatalogOptions {
        exclude_marker: args.exclude_marker.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wpv-store-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn args(dir: Option<PathBuf>) -> DataArgs {
        DataArgs {
            data_dir: dir,
            database: None,
            exclude_marker: None,
        }
    }

    #[test]
    fn loads_wells_and_skips_missing_optional_files() {
        let dir = temp_dir("optional");
        std::fs::write(
            dir.join("wells.csv"),
            "WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y\n\
             SCH-012,SCH-012:UI,1,2\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("production.csv"),
            "COMP_S_NAME,PROD_DT,VO_OIL_PROD,VO_GAS_PROD,VO_WAT_PROD,DIAS_ON\n\
             SCH-012:UI,20240131,100,10,5,31\n",
        )
        .unwrap();

        let db = open_store(&args(Some(dir.clone()))).unwrap();
        assert_eq!(db.query_wells().unwrap().len(), 1);
        assert_eq!(
            db.query_production(&["SCH-012:UI".to_string()]).unwrap().len(),
            1
        );
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_wells_csv_is_an_error() {
        let dir = temp_dir("missing");
        let err = open_store(&args(Some(dir.clone()))).unwrap_err();
        assert!(err.to_string().contains("wells.csv"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn no_configuration_is_an_error() {
        assert!(open_store(&args(None)).is_err());
    }

    #[test]
    fn bundled_fixtures_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
        let mut config = args(Some(dir));
        config.exclude_marker = Some("PLA".to_string());

        let db = open_store(&config).unwrap();
        let catalog = wpv_data::WellCatalog::load(&db, &catalog_options(&config)).unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.reservoirs(), vec!["HOLLIN", "T SUPERIOR", "U INFERIOR"]);
    }
}

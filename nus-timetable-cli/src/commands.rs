use std::{fs, sync::Arc};

use anyhow::Result;
use nus_timetable_core::{
    catalog::{ModuleCatalog, NusmodsSource},
    semester::Semester,
    timetable::TimetableAssembler,
};

fn catalog_for(api_root: &str) -> Arc<ModuleCatalog> {
    Arc::new(ModuleCatalog::new(Arc::new(NusmodsSource::new(api_root))))
}

/// Timetable generation command parameters
pub struct GenerateParams {
    pub api_root: String,
    pub modules: Vec<String>,
    pub semester: String,
    pub output: Option<String>,
}

/// List catalog modules, optionally filtered by a code substring
pub async fn modules_command(api_root: &str, search: Option<String>) -> Result<()> {
    let catalog = catalog_for(api_root);

    let list = catalog.get_module_list().await?;
    let needle = search.map(|s| s.trim().to_ascii_uppercase());

    let mut shown = 0usize;
    for module in list.iter() {
        if let Some(needle) = &needle {
            if !module.module_code.contains(needle.as_str()) {
                continue;
            }
        }
        let title = module
            .extra
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or("");
        println!("{} {}", module.module_code, title);
        shown += 1;
    }

    println!("{} of {} modules", shown, list.len());

    Ok(())
}

/// Print one module's detail record as pretty JSON
pub async fn show_command(api_root: &str, code: &str) -> Result<()> {
    let catalog = catalog_for(api_root);

    let detail = catalog.get_module_detail(code).await?;
    println!("{}", serde_json::to_string_pretty(&*detail)?);

    Ok(())
}

/// Generate a timetable and print or save it as JSON
pub async fn generate_command(params: GenerateParams) -> Result<()> {
    let semester = Semester::new(params.semester.clone());
    tracing::info!(
        "generating timetable for {} modules, {}",
        params.modules.len(),
        semester.label()
    );

    let assembler = TimetableAssembler::new(catalog_for(&params.api_root));
    let timetable = assembler.build(&params.modules, semester.as_str()).await;

    let skipped = params.modules.len() - timetable.len();
    if skipped > 0 {
        println!(
            "{} module(s) had no data for {} and were skipped",
            skipped,
            semester.label()
        );
    }

    let json = serde_json::to_string_pretty(&timetable)?;

    match params.output {
        Some(path) => {
            fs::write(&path, json)?;
            println!("Timetable saved to: {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

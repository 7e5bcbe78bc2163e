use std::cmp::Ordering;

use glob::Pattern;
use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};
use regex::Regex;

use super::*;

const RESULT_FILE_GLOB: &str = "results_*.json";

/// Finds `results_<name>.json` files directly inside each search directory.
///
/// An empty filter accepts every system. Output is sorted by name.
pub fn discover_systems(
    search_dirs: &[PathBuf],
    filter: &[String],
) -> Result<Vec<DiscoveredSystem>> {
    let name_pattern = Regex::new(r"(?i)^results_(.+)\.json$")
        .context("failed to compile result filename regex")?;

    let mut systems = Vec::<DiscoveredSystem>::new();
    for dir in search_dirs {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "search directory missing; skipping");
            continue;
        }

        for path in list_result_files(dir)? {
            let Some(name) = extract_system_name(&path, &name_pattern) else {
                continue;
            };
            if !filter.is_empty() && !filter.iter().any(|accepted| *accepted == name) {
                continue;
            }

            let path = std::path::absolute(&path)
                .with_context(|| format!("failed to resolve {}", path.display()))?;
            if let Some(existing) = systems.iter().find(|system| system.name == name) {
                warn!(
                    system = %name,
                    first = %existing.path.display(),
                    duplicate = %path.display(),
                    "system name discovered more than once"
                );
            }
            systems.push(DiscoveredSystem { name, path });
        }
    }

    let collator = system_name_collator()?;
    systems.sort_by(|left, right| compare_system_names(&collator, &left.name, &right.name));
    for system in &systems {
        info!(system = %system.name, path = %system.path.display(), "discovered system");
    }

    Ok(systems)
}

fn list_result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        RESULT_FILE_GLOB
    );

    let mut files = Vec::new();
    let entries =
        glob::glob(&pattern).with_context(|| format!("invalid search pattern: {pattern}"))?;
    for entry in entries {
        let path =
            entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

fn extract_system_name(path: &Path, pattern: &Regex) -> Option<String> {
    let filename = path.file_name()?.to_str()?;
    pattern
        .captures(filename)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
}

/// Root-locale collator, tertiary strength, lowercase before uppercase.
pub fn system_name_collator() -> Result<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    options.case_first = Some(CaseFirst::LowerFirst);
    Collator::try_new(&Default::default(), options)
        .map_err(|err| anyhow::anyhow!("failed to load system name collator: {err:?}"))
}

/// Collation order, falling back to byte order for collation ties.
pub fn compare_system_names(collator: &Collator, left: &str, right: &str) -> Ordering {
    collator.compare(left, right).then_with(|| left.cmp(right))
}

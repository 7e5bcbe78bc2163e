use super::*;

#[derive(Debug, Clone, Default)]
pub struct EvaluationInputs {
    pub queries: Vec<String>,
    pub ground_truth: Vec<Vec<Value>>,
}

pub fn load_inputs(queries_path: &Path, ground_truth_path: &Path) -> Result<EvaluationInputs> {
    let raw_queries = read_json_array(queries_path)?;
    if raw_queries.is_empty() {
        bail!("queries file contains no entries: {}", queries_path.display());
    }

    let raw_ground_truth = read_json_array(ground_truth_path)?;
    if raw_ground_truth.is_empty() {
        bail!(
            "ground-truth file contains no entries: {}",
            ground_truth_path.display()
        );
    }

    Ok(EvaluationInputs {
        queries: raw_queries.iter().map(normalize_query_text).collect(),
        ground_truth: raw_ground_truth
            .iter()
            .map(|item| normalize_field_list(item, FieldListContext::GroundTruth))
            .collect(),
    })
}

pub fn ensure_aligned_inputs(inputs: &EvaluationInputs) -> Result<()> {
    if inputs.queries.len() != inputs.ground_truth.len() {
        bail!(
            "strict mode: {} queries but {} ground-truth entries",
            inputs.queries.len(),
            inputs.ground_truth.len()
        );
    }
    Ok(())
}

pub fn load_system_results(system: &DiscoveredSystem) -> Result<Vec<Value>> {
    match read_json_value(&system.path)? {
        Value::Array(entries) => Ok(entries),
        other => bail!(
            "results for system {} are not a JSON array (found {}): {}",
            system.name,
            json_kind(&other),
            system.path.display()
        ),
    }
}

/// Detail rows for every system in order, then one average row per system.
pub fn build_rows(
    inputs: &EvaluationInputs,
    systems: &[DiscoveredSystem],
    strict: bool,
) -> Result<Vec<ReportRow>> {
    let mut detail_rows = Vec::<ReportRow>::new();
    let mut averages = Vec::<ReportRow>::with_capacity(systems.len());

    for system in systems {
        let entries = load_system_results(system)?;
        if strict && entries.len() != inputs.queries.len() {
            bail!(
                "strict mode: system {} has {} results but {} queries were loaded ({})",
                system.name,
                entries.len(),
                inputs.queries.len(),
                system.path.display()
            );
        }

        let totals = evaluate_system(inputs, system, &entries, &mut detail_rows);
        if totals.count() == 0 {
            warn!(system = %system.name, "no rows evaluated; averages reported as 0");
        }

        let mean = totals.mean().rounded();
        info!(
            system = %system.name,
            rows = totals.count(),
            precision = mean.precision,
            recall = mean.recall,
            f1 = mean.f1,
            "system evaluated"
        );
        averages.push(ReportRow::Average {
            system_name: system.name.clone(),
            metrics: mean,
        });
    }

    detail_rows.extend(averages);
    Ok(detail_rows)
}

fn evaluate_system(
    inputs: &EvaluationInputs,
    system: &DiscoveredSystem,
    entries: &[Value],
    rows: &mut Vec<ReportRow>,
) -> MetricTotals {
    let count = inputs
        .queries
        .len()
        .min(inputs.ground_truth.len())
        .min(entries.len());
    if count < inputs.queries.len() {
        warn!(
            system = %system.name,
            evaluated = count,
            queries = inputs.queries.len(),
            "evaluating a truncated query range"
        );
    }

    let mut totals = MetricTotals::default();
    for (index, entry) in entries.iter().take(count).enumerate() {
        let expected = &inputs.ground_truth[index];
        let retrieved = normalize_field_list(entry, FieldListContext::Retrieved);
        let metrics = compute_metrics(&retrieved, expected);
        totals.add(metrics);

        rows.push(ReportRow::Detail {
            query_id: index + 1,
            query: inputs.queries[index].clone(),
            system_name: system.name.clone(),
            retrieved_fields: render_field_list(&retrieved),
            ground_truth: render_field_list(expected),
            metrics: metrics.rounded(),
        });
    }

    totals
}

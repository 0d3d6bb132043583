use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut types = Vec::new();

    types.push(clean_type(Contact::export_to_string()?));
    types.push(clean_type(EmailVerification::export_to_string()?));
    types.push(clean_type(VerifiedContact::export_to_string()?));

    types.push(clean_type(Organization::export_to_string()?));

    types.push(clean_type(SearchRequest::export_to_string()?));
    types.push(clean_type(FilterParam::export_to_string()?));
    types.push(clean_type(FilterValue::export_to_string()?));
    types.push(clean_type(OrganizationSearchRequest::export_to_string()?));

    types.push(clean_type(PushErrorKind::export_to_string()?));
    types.push(clean_type(PushFailure::export_to_string()?));
    types.push(clean_type(PushResult::export_to_string()?));
    types.push(clean_type(PushSummary::export_to_string()?));
    types.push(clean_type(PipelineReport::export_to_string()?));

    types.push(clean_type(ApiKeyConfig::export_to_string()?));
    types.push(clean_type(SettingsResponse::export_to_string()?));
    types.push(clean_type(UpdateApiKeysRequest::export_to_string()?));

    let output_dir = Path::new("../dashboard/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Drops the generated header and cross-file imports; every type ends up in
/// the same module.
fn clean_type(type_def: String) -> String {
    let body = type_def
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n", body.trim())
}

//! Subcommand implementations
//!
//! Each command drives the launcher controller the way a screen would and
//! prints the resulting state.

use crate::output::{self, format_count, format_percent, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use studyhall_catalog::{category_label, Category, ModuleDescriptor};
use studyhall_core::Error;
use studyhall_launcher::{LauncherController, LauncherState, LevelSection};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Shared context for every command
pub struct App {
    pub controller: LauncherController,
    pub format: Format,
}

#[derive(Debug, Serialize)]
struct JsonModule<'a> {
    #[serde(flatten)]
    module: &'a ModuleDescriptor,
    completed: bool,
}

#[derive(Debug, Serialize)]
struct JsonSection<'a> {
    level: u8,
    label: &'a str,
    completed: usize,
    modules: Vec<JsonModule<'a>>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn json_modules<'a>(modules: &'a [ModuleDescriptor], state: &LauncherState) -> Vec<JsonModule<'a>> {
    modules
        .iter()
        .map(|module| JsonModule {
            module,
            completed: state.is_completed(&module.id),
        })
        .collect()
}

fn print_sections(app: &App, state: &LauncherState) -> Result<()> {
    if app.format == Format::Json {
        let sections: Vec<JsonSection<'_>> = state
            .sections
            .iter()
            .map(|section| JsonSection {
                level: section.level.number,
                label: &section.level.label,
                completed: section.completed,
                modules: json_modules(&section.modules, state),
            })
            .collect();
        return print_json(&sections);
    }

    for section in &state.sections {
        print_section(section, state);
    }
    Ok(())
}

fn print_section(section: &LevelSection, state: &LauncherState) {
    Status::header(&format!(
        "{} ({}/{})",
        section.level.label,
        section.completed,
        section.modules.len()
    ));
    for module in &section.modules {
        output::module_line(module, state.is_completed(&module.id));
    }
}

fn print_modules(app: &App, title: &str, modules: &[ModuleDescriptor]) -> Result<()> {
    let state = app.controller.state();
    if app.format == Format::Json {
        return print_json(&json_modules(modules, &state));
    }
    Status::header(title);
    for module in modules {
        output::module_line(module, state.is_completed(&module.id));
    }
    Ok(())
}

fn require_module(app: &App, id: &str) -> Result<ModuleDescriptor> {
    app.controller
        .repository()
        .get(id)
        .ok_or_else(|| Error::unknown_module(id).into())
}

/// List modules, optionally by level or category
pub fn list(app: &App, level: Option<u8>, category: Option<Category>) -> Result<()> {
    let repository = app.controller.repository();
    match (level, category) {
        (None, None) => print_sections(app, &app.controller.state()),
        (Some(level), None) => {
            print_modules(app, &studyhall_catalog::level_label(level), &repository.by_level(level))
        }
        (None, Some(category)) => {
            print_modules(app, category_label(category), &repository.by_category(category))
        }
        (Some(level), Some(category)) => {
            let modules: Vec<_> = repository
                .by_level(level)
                .into_iter()
                .filter(|m| m.category == category)
                .collect();
            let title = format!("{} / {}", studyhall_catalog::level_label(level), category_label(category));
            print_modules(app, &title, &modules)
        }
    }
}

/// Search by keyword and remember the query
pub fn search(app: &App, query: &str, record: bool) -> Result<()> {
    app.controller.set_search_active(true);
    app.controller.update_query(query);
    if record {
        app.controller.submit_search();
    }

    let state = app.controller.state();
    if app.format == Format::Text && state.sections.is_empty() {
        Status::warning(&format!("No modules match '{}'", query.trim()));
        return Ok(());
    }
    print_sections(app, &state)?;
    if app.format == Format::Text {
        println!();
        Status::info(&format_count(state.visible_module_count(), "match", "matches"));
    }
    Ok(())
}

/// Show one module with its prerequisites
pub fn show(app: &App, id: &str) -> Result<()> {
    let module = require_module(app, id)?;
    let prerequisites = app.controller.repository().prerequisites(&module);
    let completed = app.controller.state().is_completed(&module.id);

    if app.format == Format::Json {
        #[derive(Serialize)]
        struct Detail<'a> {
            #[serde(flatten)]
            module: &'a ModuleDescriptor,
            completed: bool,
            resolved_prerequisites: Vec<&'a str>,
        }
        return print_json(&Detail {
            module: &module,
            completed,
            resolved_prerequisites: prerequisites.iter().map(|m| m.id.as_str()).collect(),
        });
    }

    output::module_card(&module, completed, &prerequisites);
    Ok(())
}

/// Record a launch and print where the module lives
pub fn open(app: &App, id: &str) -> Result<()> {
    let module = app
        .controller
        .launch_module(id)
        .ok_or_else(|| Error::unknown_module(id))?;

    if app.format == Format::Json {
        return print_json(&serde_json::json!({
            "id": module.id,
            "launch_target": module.launch_target,
        }));
    }
    Status::success(&format!("Opening {} → {}", module.name, module.launch_target));
    Ok(())
}

/// Mark a module completed, or incomplete with `undo`
pub async fn complete(app: &App, id: &str, undo: bool) -> Result<()> {
    let module = require_module(app, id)?;
    let store = app.controller.store();
    if undo {
        store.mark_incomplete(&module.id).await?;
    } else {
        store.mark_completed(&module.id).await?;
    }
    report_completion(app, &module, !undo)
}

/// Flip a module's completion
pub async fn toggle(app: &App, id: &str) -> Result<()> {
    let module = require_module(app, id)?;
    app.controller.toggle_module_completion(&module.id);
    app.controller.flush().await;

    let completed = app.controller.state().is_completed(&module.id);
    report_completion(app, &module, completed)
}

fn report_completion(app: &App, module: &ModuleDescriptor, completed: bool) -> Result<()> {
    if app.format == Format::Json {
        return print_json(&serde_json::json!({ "id": module.id, "completed": completed }));
    }
    if completed {
        Status::success(&format!("{} marked complete", module.name));
    } else {
        Status::success(&format!("{} marked incomplete", module.name));
    }
    Ok(())
}

/// Show or clear recent searches and modules
pub async fn recent(app: &App, clear_searches: bool, clear_modules: bool) -> Result<()> {
    if clear_searches {
        app.controller.clear_recent_searches();
    }
    if clear_modules {
        app.controller.clear_recent_modules();
    }
    app.controller.flush().await;

    let state = app.controller.state();
    if app.format == Format::Json {
        return print_json(&serde_json::json!({
            "recent_searches": state.recent_searches,
            "recent_modules": state.recent_modules.iter().map(|m| &m.id).collect::<Vec<_>>(),
        }));
    }

    Status::header("Recent searches");
    if state.recent_searches.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for term in &state.recent_searches {
        println!("  {term}");
    }

    Status::header("Recently opened");
    if state.recent_modules.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for module in &state.recent_modules {
        output::module_line(module, state.is_completed(&module.id));
    }
    Ok(())
}

/// Drop one remembered search term
pub async fn forget(app: &App, term: &str) -> Result<()> {
    let known = app.controller.state().recent_searches.iter().any(|t| t == term.trim());
    app.controller.remove_recent_search(term);
    app.controller.flush().await;
    if app.format == Format::Json {
        return print_json(&serde_json::json!({ "term": term.trim(), "forgot": known }));
    }
    if known {
        Status::success(&format!("Forgot '{}'", term.trim()));
    } else {
        Status::warning(&format!("'{}' was not a recent search", term.trim()));
    }
    Ok(())
}

/// Expand or collapse launcher levels
pub async fn set_expanded(app: &App, level: Option<u8>, all: bool, expanded: bool) -> Result<()> {
    match (level, all) {
        (_, true) if expanded => app.controller.expand_all_levels(),
        (_, true) => app.controller.collapse_all_levels(),
        (Some(level), false) => {
            if app.controller.state().is_level_expanded(level) != expanded {
                app.controller.toggle_level_expanded(level);
            }
        }
        (None, false) => anyhow::bail!("Give a level number or --all"),
    }
    app.controller.flush().await;

    let state = app.controller.state();
    let levels: Vec<String> = state.expanded_levels.iter().map(ToString::to_string).collect();
    if app.format == Format::Json {
        return print_json(&serde_json::json!({ "expanded_levels": state.expanded_levels }));
    }
    if levels.is_empty() {
        Status::info("All levels collapsed");
    } else {
        Status::info(&format!("Expanded levels: {}", levels.join(", ")));
    }
    Ok(())
}

/// Completion per level, optionally resetting everything
pub async fn progress(app: &App, reset: bool) -> Result<()> {
    if reset {
        app.controller.clear_completed();
        app.controller.flush().await;
        if app.format == Format::Text {
            Status::success("Progress reset");
        }
    }

    let state = app.controller.state();
    if app.format == Format::Json {
        let per_level: Vec<_> = state
            .sections
            .iter()
            .map(|s| {
                serde_json::json!({
                    "level": s.level.number,
                    "completed": s.completed,
                    "total": s.modules.len(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "completed": state.completed_count,
            "total": state.total_modules,
            "levels": per_level,
        }));
    }

    Status::header("Progress");
    for section in &state.sections {
        println!(
            "  {:<32} {:>3}/{:<3} {}",
            section.level.label,
            section.completed,
            section.modules.len(),
            format_percent(section.completed, section.modules.len()).dimmed()
        );
    }
    println!();
    Status::info(&format!(
        "{} of {} completed ({})",
        state.completed_count,
        format_count(state.total_modules, "module", "modules"),
        format_percent(state.completed_count, state.total_modules)
    ));
    Ok(())
}

/// Catalog totals by level and category
pub fn stats(app: &App) -> Result<()> {
    let repository = app.controller.repository();
    let by_level = repository.count_by_level();
    let by_category = repository.count_by_category();

    if app.format == Format::Json {
        let categories: Vec<_> = by_category
            .iter()
            .map(|(category, count)| serde_json::json!({ "category": category, "count": count }))
            .collect();
        return print_json(&serde_json::json!({
            "total": repository.total_count(),
            "by_level": by_level,
            "by_category": categories,
        }));
    }

    Status::header("Modules by level");
    for (level, count) in &by_level {
        println!("  {:<32} {count:>3}", studyhall_catalog::level_label(*level));
    }
    Status::header("Modules by category");
    for (category, count) in &by_category {
        println!("  {:<32} {count:>3}", category_label(*category));
    }
    println!();
    Status::info(&format_count(repository.total_count(), "module", "modules"));
    Ok(())
}

/// Validate prerequisite references
pub fn check(app: &App) -> Result<()> {
    let catalog = app.controller.repository().catalog();
    let dangling = catalog.dangling_prerequisites();

    if app.format == Format::Json {
        let missing: Vec<_> = dangling
            .iter()
            .map(|(module, missing)| serde_json::json!({ "module": module, "missing": missing }))
            .collect();
        print_json(&serde_json::json!({ "dangling_prerequisites": missing }))?;
    } else if dangling.is_empty() {
        Status::success(&format!(
            "All prerequisites resolve across {}",
            format_count(catalog.len(), "module", "modules")
        ));
    } else {
        for (module, missing) in &dangling {
            Status::error(&format!("{module} → {missing} (not in catalog)"));
        }
    }

    catalog.validate_prerequisites()?;
    Ok(())
}

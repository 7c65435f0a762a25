//! Implementation of the `smartcart categories` command

use smartcart_core::Category;

use crate::context::AppContext;
use crate::output::{CategoriesData, CategoryEntry, JsonResponse};

/// Run the categories command
pub fn run_categories(ctx: &AppContext) -> anyhow::Result<i32> {
    let categories: Vec<CategoryEntry> = Category::all()
        .iter()
        .map(|category| CategoryEntry {
            id: category.as_str().to_string(),
            label: ctx.category_label(category.as_str()),
        })
        .collect();

    if ctx.output.json {
        JsonResponse::ok("categories", CategoriesData { categories }).print();
    } else if !ctx.output.quiet {
        let width = categories
            .iter()
            .map(|entry| entry.id.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &categories {
            if entry.id == entry.label {
                println!("{}", entry.id);
            } else {
                println!("{:<width$}  {}", entry.id, entry.label, width = width);
            }
        }
    }

    Ok(0)
}

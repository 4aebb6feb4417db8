use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wardrobe_ai::error::AppError;
use wardrobe_ai::outfits::{OutfitContext, OutfitGenerator, SeededJitter};
use wardrobe_ai::shopping::{recommend, shopping_links};
use wardrobe_ai::wardrobe::{CatalogImporter, ItemId, NewWardrobeItem, WardrobeItem};

#[derive(Args, Debug)]
pub(crate) struct OutfitArgs {
    /// Catalog file (.json array of items or .csv export)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Occasion, e.g. "office meeting" or "festival"
    #[arg(long, default_value = "")]
    pub(crate) occasion: String,
    /// Weather, e.g. "rainy" or "cold winter"
    #[arg(long, default_value = "")]
    pub(crate) weather: String,
    /// Preferred color or palette, e.g. "navy" or "pastel"
    #[arg(long, default_value = "")]
    pub(crate) color: String,
    /// Seed the tie-break jitter for reproducible picks
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the per-item score breakdown
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ShoppingArgs {
    /// Catalog file (.json array of items or .csv export)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
}

pub(crate) fn load_catalog(path: &Path) -> Result<Vec<WardrobeItem>, AppError> {
    let is_csv = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));

    let submissions: Vec<NewWardrobeItem> = if is_csv {
        CatalogImporter::from_path(path)?
    } else {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)?
    };

    Ok(submissions
        .into_iter()
        .enumerate()
        .map(|(index, submission)| submission.into_item(ItemId(format!("item-{}", index + 1))))
        .collect())
}

pub(crate) fn run_outfit(args: OutfitArgs) -> Result<(), AppError> {
    let OutfitArgs {
        catalog,
        occasion,
        weather,
        color,
        seed,
        explain,
    } = args;

    let items = load_catalog(&catalog)?;
    let generator = match seed {
        Some(seed) => OutfitGenerator::new(Arc::new(SeededJitter::new(seed))),
        None => OutfitGenerator::from_mode(wardrobe_ai::config::JitterMode::Random),
    };
    let context = OutfitContext::new(occasion, weather, color);

    if explain {
        println!("Score breakdown");
        for candidate in generator.score(&items, &context) {
            println!(
                "- {} [{}]: {} base + {:.1} jitter",
                candidate.item.name, candidate.item.category, candidate.base_score, candidate.jitter
            );
            for component in &candidate.components {
                println!("    +{} {}", component.points, component.notes);
            }
        }
        println!();
    }

    let outfit = generator.generate(&items, &context)?;
    println!("Outfit ({}% match)", outfit.match_percentage);
    for item in &outfit.items {
        let links = shopping_links(&item.name, &item.color);
        println!("- {}: {} ({})", item.category.label(), item.name, item.color);
        println!("    amazon: {}", links.amazon);
    }
    if outfit.missing_categories.is_empty() {
        println!("Every category covered.");
    } else {
        println!("Missing: {}", outfit.missing_categories.join(", "));
    }

    Ok(())
}

pub(crate) fn run_shopping(args: ShoppingArgs) -> Result<(), AppError> {
    let items = load_catalog(&args.catalog)?;
    let picks = recommend(&items);

    if picks.missing_categories.is_empty() {
        println!("Your wardrobe covers every category.");
    } else {
        let labels: Vec<&str> = picks
            .missing_categories
            .iter()
            .map(|category| category.label())
            .collect();
        println!("Wardrobe gaps: {}", labels.join(", "));
    }

    println!("\nGap fillers");
    for product in &picks.gap_fillers {
        println!(
            "- {} ({}) {} at {}",
            product.name,
            product.category.label(),
            product.price,
            product.store
        );
    }

    println!("\nTrending");
    for product in &picks.trending {
        println!("- {} {} -> {}", product.name, product.price, product.link);
    }

    Ok(())
}

mod error;
mod extract;
mod matcher;
mod namebuild;
mod price;
mod query;
mod resolver;
mod scanner;
mod stats;
mod tables;
mod types;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use extract::Extractor;
use price::{ForeignIndex, PriceConverter, PriceIndex, BASELINE_CURRENCY};
use query::KnowledgeBase;
use resolver::{EntityKind, EntityResolver, ResolvedEntity};
use types::{CatalogItem, CatalogSummary, RawCatalog};

const OUTPUT_DIR: &str = "output";
const DEFAULT_INDEX_CSV: &str = "tables/piketty_price_index.csv";
const DEFAULT_FOREIGN_JSON: &str = "tables/price_index_foreign.json";

#[derive(Parser)]
#[command(
    name = "catalog_extract",
    about = "Autograph sale catalog analyzer"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run full corpus extraction → output/*.json
    Extract {
        /// Path to corpus root directory
        #[arg(default_value = ".")]
        corpus: PathBuf,
        /// Baseline franc price-index rows (CSV: year, index value)
        #[arg(long, default_value = DEFAULT_INDEX_CSV)]
        index_csv: PathBuf,
        /// Hand-curated foreign currency index (JSON)
        #[arg(long, default_value = DEFAULT_FOREIGN_JSON)]
        foreign_json: PathBuf,
    },
    /// Resolve a raw catalog name, e.g. "Sully (Maximilien de Béthune, duc de)"
    Resolve {
        name: Vec<String>,
        /// Biographical trait text attached to the entry
        #[arg(long = "trait", default_value = "")]
        trait_text: String,
    },
    /// Build the franc price-index table → output/price_index.json
    Index {
        #[arg(long, default_value = DEFAULT_INDEX_CSV)]
        csv: PathBuf,
    },
    /// Inventory foreign currencies and their sale years from cached output
    Currencies,
    /// Resolve a name and query the knowledge base for its id
    Search {
        name: Vec<String>,
        #[arg(long = "trait", default_value = "")]
        trait_text: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Extract {
            corpus,
            index_csv,
            foreign_json,
        }) => run_extract(&corpus, &index_csv, &foreign_json),
        Some(Command::Resolve { name, trait_text }) => run_resolve(&name, &trait_text),
        Some(Command::Index { csv }) => run_index(&csv),
        Some(Command::Currencies) => run_currencies(),
        Some(Command::Search { name, trait_text }) => run_search(&name, &trait_text),
        // Default: extract from current directory
        None => run_extract(
            Path::new("."),
            Path::new(DEFAULT_INDEX_CSV),
            Path::new(DEFAULT_FOREIGN_JSON),
        ),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn output_path(name: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(name)
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = output_path(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

fn read_json<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = output_path(name);
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        eprintln!("Run extraction first to generate the exports.");
        std::process::exit(1);
    });
    serde_json::from_str(&json).unwrap_or_else(|e| {
        eprintln!("Cannot parse {}: {e}", path.display());
        eprintln!("The JSON may be from an older format. Re-run extraction.");
        std::process::exit(1);
    })
}

/// Load both price tables. Configuration errors are fatal: no table,
/// no extraction.
fn load_converter(index_csv: &Path, foreign_json: &Path) -> PriceConverter {
    let index = PriceIndex::from_csv_path(index_csv).unwrap_or_else(|e| {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    });
    let foreign = ForeignIndex::from_json_path(foreign_json).unwrap_or_else(|e| {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    });
    PriceConverter::new(index, foreign)
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: full corpus processing → output/*.json
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(corpus: &Path, index_csv: &Path, foreign_json: &Path) {
    eprintln!("Scanning corpus at: {}", corpus.display());

    let converter = load_converter(index_csv, foreign_json);
    let resolver = EntityResolver::default();
    let extractor = Extractor::new(&converter);

    // Phase 1: discover catalog files
    let files = scanner::scan_corpus(corpus);
    eprintln!("Found {} catalog files", files.len());

    // Phase 2: extract every catalog; one bad file never stops the run
    let mut items_out: BTreeMap<String, CatalogItem> = BTreeMap::new();
    let mut catalogs_out: BTreeMap<String, CatalogSummary> = BTreeMap::new();
    let mut entities_out: BTreeMap<String, ResolvedEntity> = BTreeMap::new();
    let mut failed: Vec<String> = Vec::new();
    let mut fault_count = 0usize;

    for file in &files {
        let raw: RawCatalog = match std::fs::read_to_string(&file.path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("  {}: {e}", file.path.display());
                failed.push(file.path.display().to_string());
                continue;
            }
        };

        let extraction = extractor.extract_catalog(&raw);
        for fault in &extraction.faults {
            eprintln!("  {}: {fault}", file.path.display());
            fault_count += 1;
        }

        // Phase 3: resolve the author of every entry
        for raw_item in &raw.items {
            if let Some(author) = &raw_item.author {
                let trait_text = raw_item.trait_text.as_deref().unwrap_or("");
                entities_out.insert(raw_item.id.clone(), resolver.resolve(author, trait_text));
            }
        }

        for item in extraction.items {
            // An id collision across files is an error, never an overwrite
            if items_out.contains_key(&item.id) {
                eprintln!("  {}: duplicate item id {} across files", file.path.display(), item.id);
                fault_count += 1;
                continue;
            }
            items_out.insert(item.id.clone(), item);
        }

        if catalogs_out.contains_key(&extraction.catalog_id) {
            eprintln!(
                "  {}: duplicate catalog id {} across files",
                file.path.display(),
                extraction.catalog_id
            );
            fault_count += 1;
            continue;
        }
        catalogs_out.insert(extraction.catalog_id, extraction.summary);
    }

    // ── Print statistics ───────────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  CORPUS STATISTICS");
    eprintln!("══════════════════════════════════════════");

    let priced = items_out.values().filter(|i| i.price.is_some()).count();
    let converted = items_out
        .values()
        .filter(|i| i.price_constant.is_some())
        .count();
    eprintln!("\nCatalogs: {}", catalogs_out.len());
    eprintln!("Items:    {} ({priced} priced, {converted} converted)", items_out.len());

    let (mut bundles, mut charters, mut geographies, mut persons) = (0usize, 0, 0, 0);
    for e in entities_out.values() {
        match e.kind {
            EntityKind::DocumentBundle => bundles += 1,
            EntityKind::Charter => charters += 1,
            EntityKind::Geography => geographies += 1,
            EntityKind::Person => persons += 1,
        }
    }
    eprintln!("\nResolved entities:");
    eprintln!("  Person:          {persons}");
    eprintln!("  Geography:       {geographies}");
    eprintln!("  Charter:         {charters}");
    eprintln!("  Document bundle: {bundles}");

    if fault_count > 0 {
        eprintln!("\nItem faults: {fault_count} (see diagnostics above)");
    }

    // ── Print failures ─────────────────────────────────────────────
    if !failed.is_empty() {
        eprintln!("\n══════════════════════════════════════════");
        eprintln!("  UNPARSED FILES ({} total)", failed.len());
        eprintln!("══════════════════════════════════════════");
        for f in failed.iter().take(30) {
            eprintln!("  {f}");
        }
        if failed.len() > 30 {
            eprintln!("  ... and {} more", failed.len() - 30);
        }
    }

    // ── Write output files ─────────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  WRITING OUTPUT FILES");
    eprintln!("══════════════════════════════════════════\n");

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");

    write_json("export_items.json", &items_out);
    write_json("export_catalogs.json", &catalogs_out);
    write_json("export_entities.json", &entities_out);

    eprintln!("\nDone. Inspect a single name with:");
    eprintln!("  cargo run -- resolve \"Sully (Maximilien de Béthune, duc de)\"");
}

// ═══════════════════════════════════════════════════════════════════════
//  RESOLVE MODE: classify one raw name from the command line
// ═══════════════════════════════════════════════════════════════════════

fn run_resolve(name_args: &[String], trait_text: &str) {
    let raw = name_args.join(" ");
    let resolver = EntityResolver::default();
    let entity = resolver.resolve(&raw, trait_text);

    let json = serde_json::to_string_pretty(&entity).expect("JSON serialization");
    println!("{json}");
}

// ═══════════════════════════════════════════════════════════════════════
//  INDEX MODE: build and export the franc price-index table
// ═══════════════════════════════════════════════════════════════════════

fn run_index(csv: &Path) {
    let index = PriceIndex::from_csv_path(csv).unwrap_or_else(|e| {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    });

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");
    write_json("price_index.json", index.as_table());

    let years: Vec<u16> = index.as_table().keys().copied().collect();
    eprintln!(
        "Index covers {}–{} ({} years)",
        years.first().unwrap_or(&0),
        years.last().unwrap_or(&0),
        years.len()
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  CURRENCIES MODE: foreign currency inventory from cached output
// ═══════════════════════════════════════════════════════════════════════

/// List the non-franc currencies present in the extracted items, with the
/// sale years each appears in. Used to decide which (currency, year)
/// entries the hand-curated foreign table still needs.
fn run_currencies() {
    let items: BTreeMap<String, CatalogItem> = read_json("export_items.json");

    let mut by_currency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for item in items.values() {
        let Some(currency) = &item.currency else {
            continue;
        };
        if currency == BASELINE_CURRENCY {
            continue;
        }
        let years = by_currency.entry(currency.clone()).or_default();
        if let Some(date) = &item.sale_date {
            years.insert(date.clone());
        }
    }

    if by_currency.is_empty() {
        eprintln!("No foreign currencies in the extracted items.");
        return;
    }

    eprintln!("{} foreign currencies found:", by_currency.len());
    let json = serde_json::to_string_pretty(&by_currency).expect("JSON serialization");
    println!("{json}");
}

// ═══════════════════════════════════════════════════════════════════════
//  SEARCH MODE: knowledge-base lookup for a resolved name
// ═══════════════════════════════════════════════════════════════════════

fn run_search(name_args: &[String], trait_text: &str) {
    let raw = name_args.join(" ");
    let resolver = EntityResolver::default();
    let entity = resolver.resolve(&raw, trait_text);

    let gazetteer = tables::Gazetteer::default();
    let occupation = query::occupation_hint(&gazetteer, trait_text);

    let Some(qstr) = query::build_query(&entity, occupation.as_deref()) else {
        eprintln!("Unresolved entity, not querying: {raw}");
        std::process::exit(1);
    };

    eprintln!("Query: {qstr}");
    let client = query::WikidataClient::new();
    match client.search(&qstr) {
        Ok(Some(id)) => println!("{id}"),
        Ok(None) => eprintln!("No match."),
        Err(e) => {
            eprintln!("Search failed: {e}");
            std::process::exit(1);
        }
    }
}

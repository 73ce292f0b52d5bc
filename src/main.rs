use outline_fanout::aggregate::types::AggregatedView;
use outline_fanout::config::Settings;
use outline_fanout::cycle::session::QuerySession;
use outline_fanout::cycle::state::DisplayedView;
use outline_fanout::cycle::types::{CycleOutcome, QueryKind};
use outline_fanout::instances::types::Instance;
use outline_fanout::remote::types::{Document, SNIPPET_CHARS};
use outline_fanout::remote::url::document_url;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let mut settings = Settings::from_env()?;
    let mut query: Option<QueryKind> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--instances" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("--instances needs a file path"))?;
                settings.instances_file = Some(PathBuf::from(path));
                i += 2;
            }
            "--search" => {
                let text = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("--search needs a query"))?;
                query = Some(QueryKind::Search(text.clone()));
                i += 2;
            }
            "--starred" => {
                query = Some(QueryKind::Starred);
                i += 1;
            }
            "--recent" => {
                query = Some(QueryKind::Recent);
                i += 1;
            }
            other => {
                tracing::warn!("Ignoring unknown argument {}", other);
                i += 1;
            }
        }
    }

    let Some(query) = query else {
        print_usage(&args[0]);
        std::process::exit(1);
    };

    let registry = settings.build_registry()?;
    let session = QuerySession::new(registry, Arc::new(settings.remote_service()));

    let outcome = session.run(query).await?;
    let mut displayed = DisplayedView::new();
    displayed.apply(outcome);

    if let Some(outcome) = displayed.current() {
        render(outcome);
    }

    Ok(())
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--instances <file.json>] (--search <query> | --starred | --recent)",
        program
    );
    eprintln!("Example: {} --instances instances.json --search roadmap", program);
    eprintln!(
        "Without --instances, OUTLINE_INSTANCES or OUTLINE_API_KEY/OUTLINE_INSTANCE_URL are used."
    );
}

fn render(outcome: &CycleOutcome) {
    for title in outcome.failure_titles() {
        eprintln!("! {}", title);
    }

    if !outcome.dispatched {
        eprintln!("Type something to search.");
        return;
    }

    match &outcome.view {
        AggregatedView::Flat(items) => {
            for owned in items {
                print_document(&owned.item, &owned.instance, "");
            }
        }
        AggregatedView::Grouped { groups, .. } => {
            for group in groups {
                println!("{} ({})", group.instance.name, group.items.len());
                for doc in &group.items {
                    print_document(doc, &group.instance, "  ");
                }
            }
        }
    }

    if let Some(feedback) = outcome.feedback() {
        eprintln!("{}", feedback.message());
    }
}

fn print_document(doc: &Document, instance: &Instance, indent: &str) {
    println!("{}{}  [{}]", indent, doc.title, document_url(instance, doc));
    let snippet = doc.snippet(SNIPPET_CHARS);
    if !snippet.is_empty() {
        println!("{}    {}", indent, snippet.replace('\n', " "));
    }
}

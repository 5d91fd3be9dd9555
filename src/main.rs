use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use revise::quiz::QuizState;
use revise::{
    Catalog, CatalogIndex, Config, DayStatus, FileStore, OptionMark, ProgressStore, QuizSession,
    SelectOutcome, ThemeMode, search,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const WRAP_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "revise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding progress and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every topic in catalog order
    Topics,
    /// Show a topic with its neighbours
    Show {
        /// Topic id
        id: String,
    },
    /// Search titles, definitions, recaps and categories
    Search {
        /// Query, matched as one phrase
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Mark a topic as revised, or unmark it
    Toggle {
        /// Topic id
        id: String,
    },
    /// Show overall progress
    Progress,
    /// Show the revision plan
    Plan,
    /// Recap bullets of every topic, grouped by category
    Recap,
    /// Show the reference cards
    Cheatsheet,
    /// Answer random practice questions
    Quiz {
        /// Stop after this many answers
        #[arg(short, long)]
        rounds: Option<u32>,
    },
    /// List interview questions with answers
    Interview,
    /// List practice tasks
    Practice,
    /// Show or switch the light/dark preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Forget all progress
    Reset,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let catalog = match cli.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled().context("Bundled catalog is corrupt")?,
    };
    let index = CatalogIndex::new(catalog);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    let mut store = FileStore::new(data_dir);

    match cli.command {
        None => print_overview(&index, &ProgressStore::load(&mut store)),
        Some(Commands::Topics) => print_topics(&index, &ProgressStore::load(&mut store)),
        Some(Commands::Show { id }) => print_topic(&index, &ProgressStore::load(&mut store), &id),
        Some(Commands::Search { query }) => {
            let query = query.join(" ");
            let results = search(&index, &query);
            if results.is_empty() {
                println!("No topics match \"{}\".", query);
            }
            for entry in results {
                println!("{} {:<28} {}", entry.category.icon, entry.topic.id, entry.topic.title);
            }
        }
        Some(Commands::Toggle { id }) => {
            let Some(entry) = index.find(&id) else {
                bail!("Unknown topic '{}'", id);
            };
            let mut progress = ProgressStore::load(&mut store);
            let revised = progress.toggle_revised(&id).context("Failed to save progress")?;
            let verb = if revised { "Marked" } else { "Unmarked" };
            println!("{} \"{}\" as revised.", verb, entry.topic.title);
            print_summary(&index, &progress);
        }
        Some(Commands::Progress) => print_summary(&index, &ProgressStore::load(&mut store)),
        Some(Commands::Plan) => print_plan(&index, &ProgressStore::load(&mut store)),
        Some(Commands::Recap) => print_recap(&index),
        Some(Commands::Cheatsheet) => {
            for sheet in &index.catalog().cheatsheets {
                print_list(&sheet.title, &sheet.items);
            }
        }
        Some(Commands::Quiz { rounds }) => run_quiz(&index, rounds)?,
        Some(Commands::Interview) => {
            for (i, q) in index.catalog().interview_questions.iter().enumerate() {
                println!("{}. {}", i + 1, q.question);
                println!("{}", textwrap::indent(&textwrap::fill(&q.answer, WRAP_WIDTH - 3), "   "));
                println!("   ({})\n", q.source);
            }
        }
        Some(Commands::Practice) => {
            for task in &index.catalog().practice_tasks {
                println!("## {}\n", task.title);
                println!("{}\n", textwrap::fill(&task.description, WRAP_WIDTH));
                println!("Hint: {}\n", task.hint);
                println!("{}\n", task.solution);
            }
        }
        Some(Commands::Theme { action }) => {
            let mode = match action {
                Some(ThemeAction::Toggle) => {
                    ThemeMode::toggle(&mut store).context("Failed to save theme")?
                }
                None => ThemeMode::load(&store),
            };
            println!("Theme: {}", mode);
        }
        Some(Commands::Reset) => {
            let mut progress = ProgressStore::load(&mut store);
            progress.reset().context("Failed to reset progress")?;
            println!("Progress cleared.");
        }
    }

    Ok(())
}

type Progress<'s> = ProgressStore<&'s mut FileStore>;

fn print_summary(index: &CatalogIndex, progress: &Progress<'_>) {
    let summary = progress.summary(index);
    println!(
        "{} of {} topics revised ({}%)",
        summary.revised, summary.total, summary.percentage
    );
}

fn print_overview(index: &CatalogIndex, progress: &Progress<'_>) {
    print_summary(index, progress);
    println!();
    for category in &index.catalog().categories {
        let first = index.first_topic_of(&category.id).map_or("-", |e| e.topic.id.as_str());
        println!(
            "{} {:<20} {:>2} topics   start: {}",
            category.icon,
            category.title,
            category.topics.len(),
            first
        );
    }
}

fn print_topics(index: &CatalogIndex, progress: &Progress<'_>) {
    let mut current_category = None;
    for entry in index.iter_topics() {
        if current_category != Some(entry.category.id.as_str()) {
            current_category = Some(entry.category.id.as_str());
            println!("\n{} {}", entry.category.icon, entry.category.title);
        }
        let mark = if progress.is_revised(&entry.topic.id) { "x" } else { " " };
        println!("  [{}] {:<28} {}", mark, entry.topic.id, entry.topic.title);
    }
}

fn print_topic(index: &CatalogIndex, progress: &Progress<'_>, id: &str) {
    let Some(nav) = index.neighbors(id) else {
        println!("Topic not found.");
        return;
    };
    let topic = nav.current.topic;

    println!("{} {} / {}", nav.current.category.icon, nav.current.category.title, topic.title);
    if progress.is_revised(&topic.id) {
        println!("(revised)");
    }
    println!("\n{}\n", textwrap::fill(&topic.definition, WRAP_WIDTH));
    if !topic.why_it_matters.is_empty() {
        println!("Why it matters:\n{}\n", textwrap::fill(&topic.why_it_matters, WRAP_WIDTH));
    }
    print_block("Syntax", &topic.syntax);
    print_block("Examples", &topic.examples);
    if let Some(mistakes) = &topic.common_mistakes {
        print_list("Common mistakes", mistakes);
    }
    print_list("Recap", &topic.recap);

    if let Some(prev) = nav.prev {
        println!("< prev: {} ({})", prev.topic.title, prev.topic.id);
    }
    if let Some(next) = nav.next {
        println!("> next: {} ({})", next.topic.title, next.topic.id);
    }
}

fn print_recap(index: &CatalogIndex) {
    let mut current_category = None;
    for entry in index.iter_topics() {
        if current_category != Some(entry.category.id.as_str()) {
            current_category = Some(entry.category.id.as_str());
            println!("\n{} {}", entry.category.icon, entry.category.title);
        }
        println!("\n  {} ({})", entry.topic.title, entry.topic.id);
        for line in &entry.topic.recap {
            println!("    - {}", line);
        }
    }
}

fn print_block(heading: &str, snippets: &[String]) {
    if snippets.is_empty() {
        return;
    }
    println!("{}:", heading);
    for snippet in snippets {
        println!("{}\n", textwrap::indent(snippet, "    "));
    }
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}:", heading);
    for item in items {
        println!("  - {}", item);
    }
    println!();
}

fn print_plan(index: &CatalogIndex, progress: &Progress<'_>) {
    for day in index.catalog().revision_plan.days() {
        let status = match day.status(index, progress) {
            DayStatus::Complete => "done",
            DayStatus::Partial => "in progress",
            DayStatus::NotStarted => "not started",
        };
        println!("Day {}: {} [{}]", day.day, day.title, status);
        for entry in day.topics(index) {
            let mark = if progress.is_revised(&entry.topic.id) { "x" } else { " " };
            println!("  [{}] {}", mark, entry.topic.title);
        }
    }
}

fn run_quiz(index: &CatalogIndex, rounds: Option<u32>) -> Result<()> {
    let mut quiz = QuizSession::new(index.flatten_questions()).context("Cannot start a quiz")?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if quiz.state() == QuizState::Unanswered {
            let current = quiz.current();
            println!("\nTopic: {}", current.topic_title);
            println!("{}", current.question.question);
            for (i, (option, _)) in quiz.option_marks().iter().enumerate() {
                println!("  {}) {}", option_letter(i), option);
            }
        }

        prompt(if quiz.is_revealed() {
            "[Enter] next, r reset score, q quit: "
        } else {
            "Answer by letter, r reset score, q quit: "
        })?;
        let Some(line) = lines.next() else {
            break;
        };
        let input = line.context("Failed to read answer")?.trim().to_lowercase();

        match input.as_str() {
            "q" => break,
            "r" => {
                quiz.reset_score();
                println!("Score reset.");
                continue;
            }
            _ if quiz.is_revealed() => {
                quiz.next();
                continue;
            }
            _ => {}
        }

        let marks = quiz.option_marks();
        let Some(&(option, _)) = parse_letter(&input).and_then(|i| marks.get(i)) else {
            println!("Pick one of A-{}.", option_letter(marks.len().saturating_sub(1)));
            continue;
        };

        let outcome = quiz.select(option);
        for (i, (option, mark)) in quiz.option_marks().iter().enumerate() {
            let tag = match mark {
                OptionMark::Correct => "  <- answer",
                OptionMark::Wrong => "  <- your pick",
                OptionMark::Pending | OptionMark::Dimmed => "",
            };
            println!("  {}) {}{}", option_letter(i), option, tag);
        }
        let score = quiz.score();
        match outcome {
            SelectOutcome::Correct => println!("Correct! Score {}/{}", score.correct, score.total),
            SelectOutcome::Wrong => println!("Wrong! Score {}/{}", score.correct, score.total),
            SelectOutcome::AlreadyAnswered => {}
        }

        if rounds.is_some_and(|r| score.total >= r) {
            break;
        }
    }

    let score = quiz.score();
    println!("\nFinal score: {} / {}", score.correct, score.total);
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush().context("Failed to flush stdout")
}

fn option_letter(i: usize) -> char {
    (b'A' + i as u8) as char
}

fn parse_letter(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'a'..='z'), None) => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

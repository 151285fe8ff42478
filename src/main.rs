// stepviz: step-by-step data structure visualizer

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stepviz::config::AppConfig;
use stepviz::engine::{PlaybackEngine, PlaybackEvent, StepOutcome};
use stepviz::generators::{generate, Operation};
use stepviz::structures::StructureKind;
use stepviz::ui::App;

#[derive(Parser)]
#[command(name = "stepviz")]
#[command(version, about = "Step-by-step data structure algorithm visualizer", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Structure shown at startup (ignored when --operation is given)
    #[arg(short, long, value_enum, default_value_t = StructureArg::Array)]
    structure: StructureArg,

    /// Operation to queue at startup
    #[arg(short, long, value_enum)]
    operation: Option<OperationArg>,

    /// Operand for searches and insertions
    #[arg(long, allow_hyphen_values = true)]
    value: Option<i32>,

    /// Position for insert-at
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Initial values, overriding [data] values
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    values: Option<Vec<i32>>,

    /// Huffman source text, or the bit string for decode
    #[arg(long)]
    text: Option<String>,

    /// Playback speed multiplier
    #[arg(long)]
    speed: Option<f32>,

    /// Play the operation to completion and print each step instead of opening the TUI
    #[arg(long, requires = "operation")]
    headless: bool,

    /// Write logs here (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StructureArg {
    Array,
    List,
    Hash,
    Heap,
    Huffman,
}

impl From<StructureArg> for StructureKind {
    fn from(arg: StructureArg) -> Self {
        match arg {
            StructureArg::Array => StructureKind::Array,
            StructureArg::List => StructureKind::LinkedList,
            StructureArg::Hash => StructureKind::HashTable,
            StructureArg::Heap => StructureKind::Heap,
            StructureArg::Huffman => StructureKind::Huffman,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OperationArg {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
    InsertHead,
    InsertTail,
    InsertAt,
    DeleteHead,
    Reverse,
    ListSearch,
    HashInsert,
    HashSearch,
    HashDelete,
    HeapInsert,
    ExtractRoot,
    BuildHeap,
    HuffmanBuild,
    Encode,
    Decode,
}

impl Cli {
    fn operation(&self, config: &AppConfig) -> Option<Operation> {
        let value = self.value.unwrap_or(0);
        let text = self.text.clone().unwrap_or_else(|| config.data.text.clone());
        let operation = match self.operation? {
            OperationArg::BubbleSort => Operation::BubbleSort,
            OperationArg::SelectionSort => Operation::SelectionSort,
            OperationArg::InsertionSort => Operation::InsertionSort,
            OperationArg::QuickSort => Operation::QuickSort,
            OperationArg::LinearSearch => Operation::LinearSearch(value),
            OperationArg::BinarySearch => Operation::BinarySearch(value),
            OperationArg::InsertHead => Operation::ListInsertHead(value),
            OperationArg::InsertTail => Operation::ListInsertTail(value),
            OperationArg::InsertAt => Operation::ListInsertAt {
                index: self.index,
                value,
            },
            OperationArg::DeleteHead => Operation::ListDeleteHead,
            OperationArg::Reverse => Operation::ListReverse,
            OperationArg::ListSearch => Operation::ListSearch(value),
            OperationArg::HashInsert => Operation::HashInsert(value),
            OperationArg::HashSearch => Operation::HashSearch(value),
            OperationArg::HashDelete => Operation::HashDelete(value),
            OperationArg::HeapInsert => Operation::HeapInsert(value),
            OperationArg::ExtractRoot => Operation::HeapExtractRoot,
            OperationArg::BuildHeap => Operation::HeapBuild,
            OperationArg::HuffmanBuild => Operation::HuffmanBuild(text),
            OperationArg::Encode => Operation::HuffmanEncode(text),
            OperationArg::Decode => Operation::HuffmanDecode(text),
        };
        Some(operation)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Defaults, then the config file, then command-line overrides
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(values) = &cli.values {
        config.data.values = values.clone();
    }
    if let Some(speed) = cli.speed {
        config.playback.speed = speed;
    }
    config.validate()?;

    let operation = cli.operation(&config);
    let kind = operation
        .as_ref()
        .map_or_else(|| cli.structure.into(), Operation::structure_kind);

    if cli.headless {
        if let Some(operation) = operation {
            return run_headless(&config, operation);
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(config, kind);
    if let Some(operation) = operation {
        app = app.with_operation(operation);
    }
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Logging goes to a file only; the TUI owns the terminal
fn init_logging(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Play `operation` to completion without waiting and print every step
fn run_headless(config: &AppConfig, operation: Operation) -> Result<(), Box<dyn Error>> {
    let options = config.generate_options();
    let mut engine = PlaybackEngine::new(config.initial_structure(operation.structure_kind()))
        .with_frames_per_step(config.playback.frames_per_step)
        .with_speed(config.playback.speed);

    // Encode and decode need a tree: build one from the configured text first
    if matches!(
        operation,
        Operation::HuffmanEncode(_) | Operation::HuffmanDecode(_)
    ) {
        let build = Operation::HuffmanBuild(config.data.text.clone());
        engine.enqueue(generate(engine.structure(), &build, &options)?);
        engine.run_to_completion();
        engine.clear();
        engine.drain_events();
    }

    println!("{} on {}", operation, engine.structure().kind());
    println!("start: {}", engine.structure().summary());

    let steps = generate(engine.structure(), &operation, &options)?;
    engine.enqueue(steps);
    engine.play();
    loop {
        let outcome = engine.advance();
        for event in engine.drain_events() {
            match event {
                PlaybackEvent::StepStarted { index, description } => {
                    let kind = engine.steps()[index].kind;
                    println!("{:>4}. {:<10} {}", index + 1, kind.label(), description);
                }
                PlaybackEvent::MutationFailed { index, reason } => {
                    eprintln!("step {} failed: {}", index + 1, reason);
                }
                _ => {}
            }
        }
        if matches!(outcome, StepOutcome::Completed | StepOutcome::Idle) {
            break;
        }
    }

    println!("final: {}", engine.structure().summary());
    println!("{} steps", engine.total_steps());
    Ok(())
}

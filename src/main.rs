//! vezda-view - terminal viewer for wave-imaging experiments.

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use vezda_view::app::App;
use vezda_view::config::{PlotParams, StyleArgs};
use vezda_view::data::{DataReader, VectorSide, WiggleType};
use vezda_view::render;
use vezda_view::session::{Session, VectorSession, WaveSession};

#[derive(Parser, Debug)]
#[command(name = "vezda-view")]
#[command(about = "A terminal viewer for wave-imaging experiments", long_about = None)]
struct Args {
    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: ViewerCommand,
}

#[derive(Subcommand, Debug)]
enum ViewerCommand {
    /// Page through recorded data, one source at a time
    Data {
        /// NetCDF file holding the recordings
        file: PathBuf,
        /// Draw a map of receivers and sources next to the traces
        #[arg(long)]
        map: bool,
        /// Ignore the reciprocal dataset even if the file has one
        #[arg(long)]
        no_reciprocal: bool,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Page through impulse responses, one sampling point at a time
    Impulse {
        /// NetCDF file holding the impulse responses
        file: PathBuf,
        /// Draw a map of receivers and sampling points next to the traces
        #[arg(long)]
        map: bool,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Page through singular vectors
    Vectors {
        /// NetCDF file holding the singular vectors
        file: PathBuf,
        /// Side shown as real and imaginary parts for complex vectors
        #[arg(long, value_enum, default_value_t = VectorSide::Left)]
        part: VectorSide,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Page through reconstructed images, one regularization parameter at a time
    Image {
        /// NetCDF file holding the images
        file: PathBuf,
        #[command(flatten)]
        style: StyleArgs,
    },
}

impl ViewerCommand {
    fn file(&self) -> &Path {
        match self {
            ViewerCommand::Data { file, .. }
            | ViewerCommand::Impulse { file, .. }
            | ViewerCommand::Vectors { file, .. }
            | ViewerCommand::Image { file, .. } => file,
        }
    }

    /// Load the frame stack and style configuration.
    fn load(self) -> vezda_view::Result<(Session, PlotParams, PathBuf)> {
        match self {
            ViewerCommand::Data {
                file,
                map,
                no_reciprocal,
                style,
            } => {
                let records = DataReader::read_waves(&file, WiggleType::Data, !no_reciprocal)?;
                Ok((Session::Waves(WaveSession::new(records, map)), style.into(), file))
            },
            ViewerCommand::Impulse { file, map, style } => {
                let records = DataReader::read_waves(&file, WiggleType::Impulse, false)?;
                Ok((Session::Waves(WaveSession::new(records, map)), style.into(), file))
            },
            ViewerCommand::Vectors { file, part, style } => {
                let vectors = DataReader::read_vectors(&file)?;
                Ok((
                    Session::Vectors(VectorSession { vectors, side: part }),
                    style.into(),
                    file,
                ))
            },
            ViewerCommand::Image { file, style } => {
                let stack = DataReader::read_images(&file)?;
                Ok((Session::Images(stack), style.into(), file))
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting vezda-view");
    }

    if !args.command.file().exists() {
        eprintln!("Error: Path not found: {}", args.command.file().display());
        std::process::exit(1);
    }

    // Load before taking over the terminal so errors print normally
    let (session, params, path) = match args.command.load() {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!("load failed: {}", err);
            eprintln!("Error: {}", err);
            std::process::exit(1);
        },
    };
    let app = App::new(session, params, path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("vezda-view exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| render::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

//! Qu0x in the terminal.
//!
//! Plays today's puzzle unless another day or seed is given. Progress is
//! saved to `--store` when set; without it the session lives in memory.

use std::{
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
    process,
};

use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Parser};
use qu0x_app::{Command, FileStore, KeyValueStore, MemoryStore, Profile, Settings, share_text};
use qu0x_eval::search;
use qu0x_game::{Game, InputBlockReason, InputOperation};
use qu0x_generator::{DayIndex, PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(group(ArgGroup::new("puzzle").args(["day", "date", "seed", "random"])))]
struct Args {
    /// Play the puzzle of this day number (0 is the first puzzle).
    #[arg(long, value_name = "N")]
    day: Option<u32>,

    /// Play the puzzle of this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Play the daily puzzle of a day number or date, or a practice puzzle
    /// from any other phrase.
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Play a random practice puzzle.
    #[arg(long)]
    random: bool,

    /// Save progress to this JSON file.
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Draw targets from 20-250 instead of 1-100.
    #[arg(long)]
    wide: bool,

    /// Highest die face (1-9).
    #[arg(long, value_name = "MAX")]
    faces: Option<u8>,

    /// Withhold one operator per day.
    #[arg(long)]
    block_operators: bool,

    /// Only check dice usage while typing.
    #[arg(long)]
    permissive: bool,
}

impl Args {
    /// Returns the seed to play, or the requested day if it is after `today`.
    fn seed(&self, today: DayIndex) -> Result<PuzzleSeed, DayIndex> {
        let seed = if let Some(seed) = &self.seed {
            seed.clone()
        } else if self.random {
            PuzzleSeed::random()
        } else if let Some(date) = self.date {
            DayIndex::from_date(date).into()
        } else {
            self.day.map_or(today, DayIndex::new).into()
        };
        match seed.day() {
            Some(day) if day > today => Err(day),
            _ => Ok(seed),
        }
    }

    fn apply(&self, settings: Settings) -> Settings {
        Settings {
            max_face: self.faces.unwrap_or(settings.max_face),
            wide_targets: settings.wide_targets || self.wide,
            block_operators: settings.block_operators || self.block_operators,
            permissive: settings.permissive || self.permissive,
            ..settings
        }
    }
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let today = DayIndex::from_date(Local::now().date_naive());

    match &args.store {
        Some(path) => match FileStore::open(path) {
            Ok(store) => run(&args, Profile::open(store, today)),
            Err(e) => {
                log::warn!("cannot open {}: {e}; progress will not be saved", path.display());
                run(&args, Profile::open(MemoryStore::new(), today));
            }
        },
        None => run(&args, Profile::open(MemoryStore::new(), today)),
    }
}

fn run<S: KeyValueStore>(args: &Args, profile: Profile<S>) {
    let today = profile.today();
    let seed = match args.seed(today) {
        Ok(seed) => seed,
        Err(day) => {
            eprintln!(
                "puzzle #{} is not out yet; today is #{}",
                day.game_number(),
                today.game_number()
            );
            process::exit(2);
        }
    };
    let settings = args.apply(*profile.settings());
    let config = match settings.generator_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("--faces: {e}");
            process::exit(2);
        }
    };
    let puzzle = PuzzleGenerator::new(config).generate_with_seed(seed);
    log::info!("playing puzzle {}", puzzle.seed);

    let profile = profile.with_settings(settings);
    let mut session = Session {
        game: profile.start_game(puzzle),
        profile,
    };
    session.show();
    println!("type `help` for commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => session.handle(command),
            Err(e) => println!("? {e}"),
        }
    }
}

struct Session<S> {
    profile: Profile<S>,
    game: Game,
}

impl<S: KeyValueStore> Session<S> {
    fn handle(&mut self, command: Command) {
        match command {
            Command::Die(index) => self.edit(|game| game.append_die(index)),
            Command::Key(symbol) => self.edit(|game| game.press(symbol)),
            Command::Type(expression) => {
                self.edit(|game| game.enter(&expression).map(|()| InputOperation::Set));
            }
            Command::Back => self.edit(Game::backspace),
            Command::Clear => self.edit(Game::clear),
            Command::Submit => self.submit(),
            Command::Hint => self.hint(),
            Command::Show => self.show(),
            Command::Stats => self.stats(),
            Command::Share => self.share(),
            Command::Help => println!("{}", qu0x_app::command::HELP),
            Command::Quit => {}
        }
    }

    fn edit(
        &mut self,
        f: impl FnOnce(&mut Game) -> Result<InputOperation, InputBlockReason>,
    ) {
        match f(&mut self.game) {
            Ok(_) => self.status(),
            Err(reason) => println!("! {reason}"),
        }
    }

    fn status(&self) {
        let feedback = self.game.feedback();
        let text = self.game.builder().text();
        match (feedback.value, feedback.score) {
            (Ok(value), Some(score)) => println!("  {text} = {value} (score {score})"),
            _ if text.is_empty() => println!("  (empty)"),
            _ => println!("  {text}"),
        }
    }

    fn show(&self) {
        let puzzle = self.game.puzzle();
        match puzzle.seed.day() {
            Some(day) => println!(
                "Qu0x #{} ({})",
                day.game_number(),
                day.date()
                    .map_or_else(|| "-".to_owned(), |date| date.to_string())
            ),
            None => println!("Qu0x practice: {}", puzzle.seed),
        }
        let dice = puzzle
            .dice
            .iter()
            .map(|(index, die)| {
                let mark = if self.game.used().contains(index) { "*" } else { " " };
                format!("{}:{die}{mark}", index.index() + 1)
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("  dice    {dice}");
        println!("  target  {}", puzzle.target);
        println!("  keys    {}", puzzle.allowed_operators);
        if let Some(best) = self.game.best_score() {
            println!("  best    {best} after {} attempts", self.game.attempts().len());
        }
        if self.game.is_locked() {
            println!("  solved: {}", self.game.expression());
        } else {
            self.status();
        }
    }

    fn submit(&mut self) {
        let attempt = match self.game.submit() {
            Ok(attempt) => attempt,
            Err(e) => {
                println!("! {e}");
                return;
            }
        };
        println!(
            "  {} = {} (score {})",
            attempt.expression, attempt.result, attempt.score
        );
        if attempt.is_perfect() {
            println!("  perfect!");
        }
        let timestamp = chrono::Utc::now().timestamp();
        if let Err(e) = self
            .profile
            .record_attempt(self.game.puzzle(), &attempt, timestamp)
        {
            log::warn!("failed to save attempt: {e}");
        }
    }

    fn hint(&self) {
        let puzzle = self.game.puzzle();
        match search::closest(&puzzle.dice, puzzle.target, puzzle.allowed_operators) {
            Some(hint) if hint.distance(puzzle.target) == 0 => {
                println!("  the target can be reached exactly");
            }
            Some(hint) => println!(
                "  the closest reachable value is {} ({} away)",
                hint.value,
                hint.distance(puzzle.target)
            ),
            None => println!("  no hint for these keys"),
        }
    }

    fn stats(&self) {
        let streak = self.profile.streak().current(self.profile.today());
        println!("  streak  {streak}");
        println!("  {}", self.profile.statistics());
        let days = self.profile.archived_days();
        if let (Some(first), Some(last)) = (days.first(), days.last()) {
            println!("  archive #{}..#{}", first.game_number(), last.game_number());
        }
    }

    fn share(&self) {
        let Some(day) = self.game.puzzle().seed.day() else {
            println!("! practice puzzles cannot be shared");
            return;
        };
        if !self.game.is_locked() {
            println!("! solve the puzzle first");
            return;
        }
        println!("{}", share_text(day, self.game.expression()));
    }
}

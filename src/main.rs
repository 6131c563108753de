use std::path::Path;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use satchel::config::SatchelConfig;
use satchel::core::calendar::{MonthView, WEEKDAY_LABELS};
use satchel::core::date;
use satchel::error::Error;
use satchel::photo::PhotoSlot;
use satchel::repo::{EventRepo, FeedRepo, TaskRepo};
use satchel::store::Store;

fn main() -> ExitCode {
    // Log to the systemd user journal (`journalctl --user -t satchel -f`);
    // command output itself goes to stdout.
    if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
        let _ = journal
            .with_syslog_identifier("satchel".to_string())
            .install();
    }
    log::set_max_level(log::LevelFilter::Info);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(pos) = args.iter().position(|a| a == "--debug") {
        args.remove(pos);
        satchel::set_debug_logging(true);
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = SatchelConfig::load();
    if let Err(e) = config.ensure_files() {
        eprintln!(
            "cannot create data directory {}: {}",
            config.data_directory.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let store = Store::new(config.data_path());
    let tasks = TaskRepo::new(store.clone());
    let events = EventRepo::new(store.clone());
    let feed = FeedRepo::new(store.clone());
    let photo = PhotoSlot::new(config.images_dir(), store);
    let today = Local::now().date_naive();

    let command = args.first().map(String::as_str).unwrap_or("today");
    let result = match command {
        "today" => {
            print_today(&tasks, today);
            Ok(())
        }
        "tasks" => {
            for (index, task) in tasks.list().iter().enumerate() {
                let mark = if task.done { "x" } else { " " };
                let date = task
                    .date
                    .map(|d| d.format(date::ISO_DATE).to_string())
                    .unwrap_or_else(|| "today".to_string());
                println!("{index:3} [{mark}] {date}  {}", task.title);
            }
            Ok(())
        }
        "add" => cmd_add(&tasks, &args[1..], today),
        "done" => parse_index(args.get(1)).and_then(|i| tasks.toggle_done(i).map(|_| ())),
        "rm" => parse_index(args.get(1)).and_then(|i| tasks.delete(i).map(|_| ())),
        "events" => {
            for (index, event) in events.list().iter().enumerate() {
                let time = event
                    .time
                    .map(|t| t.format(date::CLOCK_TIME).to_string())
                    .unwrap_or_default();
                println!(
                    "{index:3} {} {:5}  {}  {}",
                    event.date.format(date::ISO_DATE),
                    time,
                    event.title,
                    event.details
                );
            }
            Ok(())
        }
        "event-add" => cmd_event_add(&events, &args[1..]),
        "event-done" => parse_index(args.get(1)).and_then(|i| events.toggle_done(i).map(|_| ())),
        "event-rm" => parse_index(args.get(1)).and_then(|i| events.delete(i).map(|_| ())),
        "agenda" => {
            for item in feed.list(today) {
                let mark = if item.done { "x" } else { " " };
                let time = item
                    .time
                    .map(|t| t.format(date::CLOCK_TIME).to_string())
                    .unwrap_or_default();
                println!(
                    "[{mark}] {} {:5} {:5}  {}  ({})",
                    item.date.format(date::ISO_DATE),
                    time,
                    item.kind.label(),
                    item.title,
                    item.id
                );
            }
            Ok(())
        }
        "agenda-done" => parse_id(args.get(1)).and_then(|id| feed.toggle_done(id)),
        "agenda-rm" => parse_id(args.get(1)).and_then(|id| feed.delete(id)),
        "cal" => {
            cmd_cal(args.get(1), today);
            Ok(())
        }
        "photo" => cmd_photo(&photo, &args[1..]),
        "help" | "--help" | "-h" => {
            usage();
            Ok(())
        }
        other => {
            eprintln!("unknown command: {other}");
            usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_today(tasks: &TaskRepo, today: NaiveDate) {
    println!("Today: {}", today.format("%A, %-d %B %Y"));
    let due = tasks.list_for_date(today, today);
    if due.is_empty() {
        println!("  nothing due");
        return;
    }
    for task in due.iter().filter(|t| !t.done) {
        println!("  [ ] {}", task.title);
    }
    for task in due.iter().filter(|t| t.done) {
        println!("  [x] {}", task.title);
    }
}

fn cmd_add(tasks: &TaskRepo, args: &[String], today: NaiveDate) -> satchel::error::Result<()> {
    let mut date = Some(today);
    let mut words: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--date" {
            date = iter.next().and_then(|d| date::parse_date(d));
        } else if arg == "--floating" {
            // No date at all: the task follows "today" around.
            date = None;
        } else {
            words.push(arg);
        }
    }
    let task = tasks.add(&words.join(" "), date)?;
    println!("added task {}", task.title);
    Ok(())
}

fn cmd_event_add(events: &EventRepo, args: &[String]) -> satchel::error::Result<()> {
    let title = args.first().map(String::as_str).unwrap_or_default();
    let date = args
        .get(1)
        .and_then(|d| date::parse_date(d))
        .ok_or_else(|| Error::ValidationFailed("expected a date like 2024-01-05".into()))?;
    let time = args.get(2).and_then(|t| date::parse_time(t));
    let details = args.get(3).map(String::as_str).unwrap_or_default();
    let event = events.add(title, date, time, details)?;
    println!("added event {} on {}", event.title, event.date);
    Ok(())
}

fn cmd_cal(month_arg: Option<&String>, today: NaiveDate) {
    let view = month_arg
        .and_then(|s| {
            let (y, m) = s.split_once('-')?;
            Some(MonthView::new(y.parse().ok()?, m.parse().ok()?))
        })
        .unwrap_or_else(|| MonthView::containing(today));

    println!("{:^28}", view.title());
    for label in WEEKDAY_LABELS {
        print!("{label:>4}");
    }
    println!();
    for week in view.cells().chunks(7) {
        for cell in week {
            match cell {
                Some(day) => print!("{day:>4}"),
                None => print!("    "),
            }
        }
        println!();
    }
}

fn cmd_photo(photo: &PhotoSlot, args: &[String]) -> satchel::error::Result<()> {
    match args.first().map(String::as_str) {
        Some("set") => {
            let source = args
                .get(1)
                .ok_or_else(|| Error::ValidationFailed("photo set needs a file path".into()))?;
            let dest = photo.set(Path::new(source))?;
            println!("photo saved to {}", dest.display());
            Ok(())
        }
        Some("clear") => {
            photo.clear()?;
            println!("photo cleared");
            Ok(())
        }
        Some("show") | None => {
            match photo.current() {
                Some(path) => println!("{}", path.display()),
                None => println!("no photo set"),
            }
            Ok(())
        }
        Some(other) => Err(Error::ValidationFailed(format!(
            "unknown photo action: {other}"
        ))),
    }
}

fn parse_index(arg: Option<&String>) -> satchel::error::Result<usize> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| Error::ValidationFailed("expected a list index".into()))
}

fn parse_id(arg: Option<&String>) -> satchel::error::Result<Uuid> {
    arg.and_then(|a| Uuid::parse_str(a).ok())
        .ok_or_else(|| Error::ValidationFailed("expected an item id".into()))
}

fn usage() {
    println!(
        "\
satchel - student life planner

  satchel [today]                     tasks due today
  satchel tasks                       all tasks with indices
  satchel add <title> [--date D]      add a task (--floating for no date)
  satchel done <n> | rm <n>           toggle or delete a task by index
  satchel events                      all events with indices
  satchel event-add <title> <date> [time] [details]
  satchel event-done <n> | event-rm <n>
  satchel agenda                      merged tasks + events, newest first
  satchel agenda-done <id> | agenda-rm <id>
  satchel cal [YYYY-MM]               month grid
  satchel photo [show|set <path>|clear]
  satchel --debug                     verbose journal logging"
    );
}

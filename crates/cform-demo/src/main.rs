#![forbid(unsafe_code)]

//! Scripted customer form session.
//!
//! Drives [`CustomerForm`] the way a user would: typing with pauses,
//! switching the notification preference, and submitting. Time is
//! synthetic, so the run is instant and deterministic.

mod cli;

use std::process;

use cform_core::customer::{CONFIRM_EMAIL, EMAIL, FIRST_NAME, LAST_NAME, NOTIFICATION, PHONE};
use cform_core::{CustomerForm, FormConfig, FormError};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use web_time::{Duration, Instant};

/// Gap between simulated keystrokes.
const KEYSTROKE: Duration = Duration::from_millis(120);

fn main() {
    let opts = cli::Opts::parse();
    init_tracing(&opts.log);

    if let Err(e) = run(&opts) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Synthetic clock with an attached form.
struct Session {
    form: CustomerForm,
    now: Instant,
    window: Duration,
}

impl Session {
    fn advance(&mut self, by: Duration) {
        self.now += by;
        if self.form.tick_at(self.now) {
            println!("email message: {:?}", self.form.email_message());
        }
    }

    /// Type `text` one character at a time.
    fn type_into(&mut self, path: &str, text: &str) -> Result<(), FormError> {
        let mut typed = String::new();
        for c in text.chars() {
            typed.push(c);
            self.form.set_value_at(path, typed.as_str(), self.now)?;
            self.advance(KEYSTROKE);
        }
        self.form.mark_touched(path)
    }

    fn pause(&mut self) {
        self.advance(self.window);
    }
}

fn run(opts: &cli::Opts) -> Result<(), Box<dyn std::error::Error>> {
    let config = FormConfig::default().with_debounce_ms(opts.debounce_ms);
    let window = config.debounce().window;
    let mut session = Session {
        form: CustomerForm::new(config)?,
        now: Instant::now(),
        window,
    };
    info!(sample = opts.sample, debounce_ms = opts.debounce_ms, "session started");

    if opts.sample {
        session.form.populate_test_data_at(session.now)?;
    } else {
        session.type_into(FIRST_NAME, "Juan")?;
        session.type_into(LAST_NAME, "Perez")?;
        session.type_into(EMAIL, "juan")?;
        session.pause();
        session.type_into(EMAIL, "juan@mail.com")?;
        session.type_into(CONFIRM_EMAIL, "juan@mail.com")?;
        session.type_into("addresses.0.street1", "Calle República")?;
        session.type_into("addresses.0.city", "Ciudad de Córdoba")?;
    }

    session.form.set_value_at(NOTIFICATION, "text", session.now)?;
    println!(
        "phone required while notifying by text: {}",
        !session.form.model().errors(PHONE)?.is_empty()
    );
    session.type_into(PHONE, "351 555 0101")?;
    session.pause();

    let submission = session.form.submit();
    println!("valid: {}", submission.valid);
    println!("{}", submission.to_json()?);
    Ok(())
}

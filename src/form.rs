use std::io::{BufRead, Write};

use crate::error::BookingError;
use crate::export::{self, ExportOptions};
use crate::model::{CarType, DropLocation, Station};
use crate::session::BookingSession;
use crate::ticket::Ticket;

pub const HELP: &str = "\
Commands:
  name <full name>      passenger name
  from <station>        source station
  to <station>          destination station
  count <n>             number of passengers
  cab yes | cab no      add or remove the last-mile cab
  drop <location>       cab drop location
  car mini|sedan|suv    cab car type
  show                  redraw the form
  book                  book ticket and write ticket files
  help                  this text
  quit                  leave the form";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Name(String),
    From(Station),
    To(Station),
    Count(u32),
    Cab(bool),
    Drop(DropLocation),
    Car(CarType),
    Show,
    Book,
    Help,
    Quit,
}

impl FormCommand {
    pub fn parse(line: &str) -> Result<Self, BookingError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };

        let needs_arg = |what: &str| {
            if rest.is_empty() {
                Err(BookingError::Validation(format!("{verb} needs {what}")))
            } else {
                Ok(rest)
            }
        };

        match verb.to_lowercase().as_str() {
            "name" => Ok(Self::Name(rest.to_string())),
            "from" => Station::from_str_loose(needs_arg("a station")?).map(Self::From),
            "to" => Station::from_str_loose(needs_arg("a station")?).map(Self::To),
            "count" => needs_arg("a number")?
                .parse()
                .map(Self::Count)
                .map_err(|_| BookingError::Validation(format!("invalid passenger count: {rest}"))),
            "cab" => match rest.to_lowercase().as_str() {
                "yes" | "y" => Ok(Self::Cab(true)),
                "no" | "n" => Ok(Self::Cab(false)),
                _ => Err(BookingError::Validation("cab takes yes or no".into())),
            },
            "drop" => DropLocation::from_str_loose(needs_arg("a location")?).map(Self::Drop),
            "car" => CarType::from_str_loose(needs_arg("a car type")?).map(Self::Car),
            "show" => Ok(Self::Show),
            "book" => Ok(Self::Book),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(BookingError::Validation(format!(
                "unknown command: {verb} (type help)"
            ))),
        }
    }
}

fn print_ticket<W: Write>(out: &mut W, ticket: &Ticket) -> std::io::Result<()> {
    writeln!(out, "{}", ticket.confirmation())?;
    writeln!(out, "{}", ticket.text)
}

/// Runs the interactive form until `quit` or end of input. Returns how
/// many tickets were booked and saved. Input and export errors are printed
/// and the loop goes on; only a failing `out` ends it early.
pub fn run<R: BufRead, W: Write>(
    session: &mut BookingSession,
    input: R,
    out: &mut W,
    export_options: &ExportOptions,
) -> Result<usize, BookingError> {
    let mut booked = 0;
    writeln!(out, "{}", session.view())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match FormCommand::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        match command {
            FormCommand::Name(name) => session.set_name(name),
            FormCommand::From(s) => session.set_source(s),
            FormCommand::To(s) => session.set_destination(s),
            FormCommand::Count(n) => {
                if let Err(e) = session.set_passengers(n) {
                    writeln!(out, "error: {e}")?;
                    continue;
                }
            }
            FormCommand::Cab(true) => session.request_cab(),
            FormCommand::Cab(false) => session.decline_cab(),
            FormCommand::Drop(d) => session.set_drop(d),
            FormCommand::Car(c) => session.set_car_type(c),
            FormCommand::Show => {}
            FormCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            FormCommand::Quit => break,
            FormCommand::Book => {
                match session.book(None) {
                    Ok(ticket) => {
                        tracing::info!(id = %ticket.id, total = ticket.fare.grand_total, "booking confirmed");
                        print_ticket(out, &ticket)?;
                        match export::export(&ticket, export_options) {
                            Ok(files) => {
                                for artifact in files.iter() {
                                    writeln!(out, "saved {}", artifact.path.display())?;
                                }
                                booked += 1;
                            }
                            Err(e) => writeln!(out, "error: {e}")?,
                        }
                    }
                    Err(e) => writeln!(out, "error: {e}")?,
                }
                continue;
            }
        }

        writeln!(out, "{}", session.view())?;
    }

    Ok(booked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            FormCommand::parse("name  Asha Rao ").unwrap(),
            FormCommand::Name("Asha Rao".into())
        );
        assert_eq!(
            FormCommand::parse("to hitech city").unwrap(),
            FormCommand::To(Station::HitechCity)
        );
        assert_eq!(FormCommand::parse("count 3").unwrap(), FormCommand::Count(3));
        assert_eq!(FormCommand::parse("CAB yes").unwrap(), FormCommand::Cab(true));
        assert_eq!(FormCommand::parse("cab n").unwrap(), FormCommand::Cab(false));
        assert_eq!(FormCommand::parse("car suv").unwrap(), FormCommand::Car(CarType::Suv));
    }

    #[test]
    fn empty_name_is_accepted_by_the_parser() {
        assert_eq!(FormCommand::parse("name").unwrap(), FormCommand::Name(String::new()));
    }

    #[test]
    fn rejects_missing_and_bad_arguments() {
        assert!(FormCommand::parse("from").is_err());
        assert!(FormCommand::parse("count two").is_err());
        assert!(FormCommand::parse("cab maybe").is_err());
        assert!(FormCommand::parse("fly away").is_err());
    }
}

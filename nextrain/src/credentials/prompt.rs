//! Interactive first-run prompt for an app ID and key.

use std::io::{self, BufRead, Write};

use super::store::Credential;

const PORTAL_URL: &str = "https://developer.transportapi.com/admin/applications/new";

/// Ask the user for a new app ID and key.
///
/// Answers are trimmed; blank answers are asked again. Running out of input
/// before both values are given is an `UnexpectedEof` error.
pub fn prompt_for_credentials<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Credential> {
    writeln!(
        output,
        "You will need an app on the Transport API Developer Portal."
    )?;
    writeln!(output)?;
    writeln!(output, "    {PORTAL_URL}")?;
    writeln!(output)?;
    writeln!(
        output,
        "When the app has been created, enter the App ID and Key below."
    )?;
    writeln!(output)?;

    let app_id = ask(input, output, "Enter App ID: ")?;
    let key = ask(input, output, "Enter Key: ")?;

    Ok(Credential::new(app_id, key))
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    loop {
        write!(output, "{label}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before credentials were entered",
            ));
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

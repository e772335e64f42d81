/*!

Renders outcomes in the Test Anything Protocol (<http://testanything.org/>) for automated
processing:

```text
1..3
ok 1 - TestLivenessHttp
not ok 2 - TestLivenessExec
ok 3 - TestLivenessHttp
```

!*/

use crate::outcome::TestOutcome;
use log::error;
use std::io::{self, Write};

/// Writes the TAP summary of `outcomes` to stdout.
pub fn report(outcomes: &[TestOutcome]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_tap(&mut out, outcomes).and_then(|_| out.flush()) {
        error!("Unable to write the test report: {}", e);
    }
}

/// Writes the partial TAP summary of an aborted run to stdout. See [`write_bail_out`].
pub fn report_bail_out(planned: usize, outcomes: &[TestOutcome], reason: &str) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_bail_out(&mut out, planned, outcomes, reason).and_then(|_| out.flush()) {
        error!("Unable to write the test report: {}", e);
    }
}

/// Writes the TAP summary of `outcomes`: the plan line, then one line per outcome, numbered from
/// one in recorded order.
pub fn write_tap<W>(out: &mut W, outcomes: &[TestOutcome]) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "1..{}", outcomes.len())?;
    write_results(out, outcomes)
}

/// Writes a TAP summary for a run that was aborted after `outcomes` were recorded out of
/// `planned` tests. The summary ends with a `Bail out!` line carrying `reason`.
pub fn write_bail_out<W>(
    out: &mut W,
    planned: usize,
    outcomes: &[TestOutcome],
    reason: &str,
) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "1..{}", planned)?;
    write_results(out, outcomes)?;
    writeln!(out, "Bail out! {}", reason)
}

fn write_results<W>(out: &mut W, outcomes: &[TestOutcome]) -> io::Result<()>
where
    W: Write,
{
    for (i, outcome) in outcomes.iter().enumerate() {
        if outcome.passed() {
            writeln!(out, "ok {} - {}", i + 1, outcome.name)?;
        } else {
            writeln!(out, "not ok {} - {}", i + 1, outcome.name)?;
        }
    }
    Ok(())
}

//! The organizer orchestrator: raw pasted script in, ordered render calls out.
//!
//! For each script line, in order: classify the sender, advance the run
//! clock by a randomised 1–3 minute step, then hand the turn to the
//! [`RenderSink`]. The organizer owns no rendering; the sink is whatever
//! turns a turn into a visible bubble.

use crate::clock::{ClockTime, MinuteJitter};
use crate::error::ModelError;
use crate::message::Sender;
use crate::script::{script_lines, Classifier};

/// Receiver for organized turns, in emission order.
///
/// The UI's chat area implements this; tests use a collecting vector.
pub trait RenderSink {
    /// Render one turn. The organizer always passes `image = None`; the
    /// slot exists because the manual compose path shares this interface.
    fn emit(&mut self, text: &str, sender: Sender, timestamp: &str, image: Option<&[u8]>);
}

/// Organize a pasted script into alternating, timestamped turns.
///
/// Seeds the run clock from `start`, then walks the script line by line:
/// classify, advance, emit. Returns the number of turns emitted.
///
/// # Errors
///
/// [`ModelError::EmptyScript`] when the script contains no non-blank lines;
/// nothing is emitted and no state is touched in that case.
///
/// # Examples
///
/// ```
/// use fauxchat_models::{organize, ChatMessage, ClockTime, Sender};
///
/// let mut turns: Vec<ChatMessage> = Vec::new();
/// let start: ClockTime = "14:58".parse().unwrap();
/// let emitted = organize("Eu: Oi!\nTudo bem?", start, &mut || 1, &mut turns).unwrap();
/// assert_eq!(emitted, 2);
/// assert_eq!(turns[0].sender, Sender::Sent);
/// assert_eq!(turns[0].timestamp, "14:59");
/// ```
pub fn organize<J, S>(
    script: &str,
    start: ClockTime,
    jitter: &mut J,
    sink: &mut S,
) -> Result<usize, ModelError>
where
    J: MinuteJitter + ?Sized,
    S: RenderSink + ?Sized,
{
    if script.trim().is_empty() {
        return Err(ModelError::EmptyScript);
    }

    let mut clock = start;
    let mut classifier = Classifier::new();
    let mut emitted = 0;

    for line in script_lines(script) {
        let (sender, text) = classifier.classify(line);
        clock.advance(jitter.next_step());
        sink.emit(text, sender, &clock.to_string(), None);
        emitted += 1;
    }

    Ok(emitted)
}

/// `Vec<ChatMessage>` collects turns directly; the TUI's organize task uses
/// this before handing the batch back to the event loop.
impl RenderSink for Vec<crate::message::ChatMessage> {
    fn emit(&mut self, text: &str, sender: Sender, timestamp: &str, image: Option<&[u8]>) {
        self.push(crate::message::ChatMessage::new(
            text,
            sender,
            timestamp,
            image.map(<[u8]>::to_vec),
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::RandomJitter;
    use crate::message::ChatMessage;

    fn start(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn fixed<I: IntoIterator<Item = u32>>(steps: I) -> impl FnMut() -> u32 {
        let mut steps = steps.into_iter().collect::<Vec<_>>().into_iter();
        move || steps.next().expect("jitter sequence exhausted")
    }

    #[test]
    fn three_line_scenario_from_fourteen_fifty_eight() {
        let script = "Eu: Oi, tudo bem?\nTudo bem e vc?\nEle: Tudo certo!";
        let mut turns: Vec<ChatMessage> = Vec::new();
        let mut jitter = fixed([2, 1, 3]);

        let emitted = organize(script, start("14:58"), &mut jitter, &mut turns).unwrap();
        assert_eq!(emitted, 3);

        assert_eq!(turns[0].sender, Sender::Sent);
        assert_eq!(turns[0].text, "Oi, tudo bem?");
        assert_eq!(turns[0].timestamp, "15:00");

        // Alternation fallback flips away from the marker-forced SELF…
        assert_eq!(turns[1].sender, Sender::Received);
        assert_eq!(turns[1].text, "Tudo bem e vc?");
        assert_eq!(turns[1].timestamp, "15:01");

        // …and the explicit marker keeps the same sender two turns running.
        assert_eq!(turns[2].sender, Sender::Received);
        assert_eq!(turns[2].text, "Tudo certo!");
        assert_eq!(turns[2].timestamp, "15:04");

        assert!(turns.iter().all(|t| t.image.is_none()));
    }

    #[test]
    fn empty_script_is_refused_with_zero_emissions() {
        let mut turns: Vec<ChatMessage> = Vec::new();
        let mut jitter = fixed([]);

        for script in ["", "   ", "\n \t \n"] {
            let err = organize(script, start("10:00"), &mut jitter, &mut turns).unwrap_err();
            assert_eq!(err, ModelError::EmptyScript);
        }
        assert!(turns.is_empty());
    }

    #[test]
    fn single_unmarked_line_defaults_to_received() {
        let mut turns: Vec<ChatMessage> = Vec::new();
        let emitted = organize("oi", start("10:00"), &mut fixed([1]), &mut turns).unwrap();
        assert_eq!(emitted, 1);
        assert_eq!(turns[0].sender, Sender::Received);
        assert_eq!(turns[0].timestamp, "10:01");
    }

    #[test]
    fn timestamps_step_by_one_to_three_minutes_mod_day() {
        let script = (0..120).map(|i| format!("linha {i}")).collect::<Vec<_>>().join("\n");
        let mut turns: Vec<ChatMessage> = Vec::new();
        let mut jitter = RandomJitter::new();

        // Start close to midnight so the run exercises the 24h wrap.
        organize(&script, start("23:40"), &mut jitter, &mut turns).unwrap();

        let mut previous = start("23:40").minute_of_day();
        for turn in &turns {
            let clock: ClockTime = turn.timestamp.parse().unwrap();
            let step = (clock.minute_of_day() + 1440 - previous) % 1440;
            assert!((1..=3).contains(&step), "step {step} at {}", turn.timestamp);
            previous = clock.minute_of_day();
        }
    }

    #[test]
    fn turns_are_emitted_in_script_order() {
        let script = "um\ndois\ntres";
        let mut turns: Vec<ChatMessage> = Vec::new();
        organize(script, start("08:00"), &mut fixed([1, 1, 1]), &mut turns).unwrap();
        let texts: Vec<_> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["um", "dois", "tres"]);
    }

    #[test]
    fn senders_alternate_when_nothing_is_marked() {
        let script = "a\nb\nc\nd\ne";
        let mut turns: Vec<ChatMessage> = Vec::new();
        organize(script, start("08:00"), &mut fixed([1; 5]), &mut turns).unwrap();
        let senders: Vec<_> = turns.iter().map(|t| t.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Received,
                Sender::Sent,
                Sender::Received,
                Sender::Sent,
                Sender::Received
            ]
        );
    }
}

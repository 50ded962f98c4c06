//! Reveal sequencer for the simulated typing animation.
//!
//! A [`RevealSequencer`] walks a fixed response string and a sparse list of
//! offset-tagged fragments, emitting one character per cadence interval.
//! It is owned, tick-driven state: the UI calls [`RevealSequencer::tick`]
//! once per timer tick, and replacing the sequencer value is a complete
//! cancellation of the in-flight reveal. No timers outlive a reveal.

use crate::conversation::Fragment;

/// Default cadence for chat replies (ticks per character).
pub const CHAT_CADENCE: u32 = 2;

/// An instruction to splice a fragment into the revealed stream.
///
/// The fragment is emitted immediately after the character at `offset`
/// (0-based). Offsets at or past the end of the text flush after the final
/// character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealDirective {
    /// Character index into the response text.
    pub offset: usize,
    /// Fragment to splice in.
    pub fragment: Fragment,
}

impl RevealDirective {
    /// Create a directive.
    pub fn new(offset: usize, fragment: Fragment) -> Self {
        Self { offset, fragment }
    }
}

/// Progressive reveal of a response string with spliced fragments.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    /// Response text as characters.
    chars: Vec<char>,
    /// Directives sorted by offset; `next_directive` indexes the first unemitted.
    directives: Vec<RevealDirective>,
    next_directive: usize,
    /// Characters emitted so far.
    emitted: usize,
    /// Revealed content; adjacent characters coalesce into one Text fragment.
    revealed: Vec<Fragment>,
    /// Ticks per emitted character (at least 1).
    cadence: u32,
    /// Ticks since the last emission.
    tick: u32,
}

impl RevealSequencer {
    /// Create a sequencer for the given text and directives.
    ///
    /// Directives are sorted by offset (stable, so equal offsets keep their
    /// given order). A zero cadence is clamped to 1.
    pub fn new(text: &str, mut directives: Vec<RevealDirective>, cadence: u32) -> Self {
        directives.sort_by_key(|d| d.offset);
        tracing::debug!(
            chars = text.chars().count(),
            directives = directives.len(),
            cadence,
            "reveal started"
        );
        Self {
            chars: text.chars().collect(),
            directives,
            next_directive: 0,
            emitted: 0,
            revealed: Vec::new(),
            cadence: cadence.max(1),
            tick: 0,
        }
    }

    /// Whether every character and directive has been emitted.
    pub fn is_done(&self) -> bool {
        self.emitted >= self.chars.len() && self.next_directive >= self.directives.len()
    }

    /// The revealed prefix, for rendering while in flight.
    pub fn fragments(&self) -> &[Fragment] {
        &self.revealed
    }

    /// Number of characters emitted so far.
    pub fn emitted_chars(&self) -> usize {
        self.emitted
    }

    /// Advance one tick. Returns true if anything new was emitted.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        // Empty text still needs its directives flushed.
        if self.chars.is_empty() {
            self.flush_pending_directives();
            tracing::debug!("reveal finished");
            return true;
        }

        self.tick += 1;
        if self.tick < self.cadence {
            return false;
        }
        self.tick = 0;

        self.emit_next();
        if self.is_done() {
            tracing::debug!("reveal finished");
        }
        true
    }

    /// Emit everything remaining at once.
    pub fn skip_to_end(&mut self) {
        while !self.is_done() {
            if self.chars.is_empty() {
                self.flush_pending_directives();
            } else {
                self.emit_next();
            }
        }
    }

    /// Finish the reveal and return the complete content for committing.
    pub fn into_fragments(mut self) -> Vec<Fragment> {
        self.skip_to_end();
        self.revealed
    }

    /// Emit the next character, then any directives due at its index.
    fn emit_next(&mut self) {
        let index = self.emitted;
        self.push_char(self.chars[index]);
        self.emitted += 1;

        if self.emitted == self.chars.len() {
            // Final character: flush everything, including past-end offsets.
            self.flush_pending_directives();
        } else {
            while self
                .directives
                .get(self.next_directive)
                .is_some_and(|d| d.offset <= index)
            {
                let fragment = self.directives[self.next_directive].fragment.clone();
                self.revealed.push(fragment);
                self.next_directive += 1;
            }
        }
    }

    fn flush_pending_directives(&mut self) {
        while self.next_directive < self.directives.len() {
            let fragment = self.directives[self.next_directive].fragment.clone();
            self.revealed.push(fragment);
            self.next_directive += 1;
        }
    }

    fn push_char(&mut self, ch: char) {
        if let Some(Fragment::Text(text)) = self.revealed.last_mut() {
            text.push(ch);
        } else {
            self.revealed.push(Fragment::Text(ch.to_string()));
        }
    }
}

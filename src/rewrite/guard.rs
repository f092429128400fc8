use regex::Regex;
use tracing::debug;

use super::buffer::SourceBuffer;
use crate::config::RewriteStyle;
use crate::parser::{
    find_direct_tick_callback, find_tick_callback, import_block_end, line_indent, line_start,
    next_code, LocateError, TickCallback,
};

/// Result of an injection into a per-tick callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Injected,
    /// The statement is already the first one in the callback.
    AlreadyApplied,
    /// An existing guard had a different divisor and was rewritten.
    Retuned { from: u32, to: u32 },
    /// Divisor 1: the callback runs every tick and needs no guard.
    NotNeeded,
    /// The component has no recognized per-tick callback.
    NoCallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    AlreadyPresent,
    /// Nothing in the file calls the helpers.
    NotNeeded,
}

/// Inserts throttle guards, the shared tick increment and the helper import.
pub struct Injector<'a> {
    style: &'a RewriteStyle,
    registrations: &'a [String],
    guard: Regex,
    counter_call: Regex,
    helper_import: Regex,
}

impl<'a> Injector<'a> {
    pub fn new(style: &'a RewriteStyle, registrations: &'a [String]) -> Result<Self, regex::Error> {
        let guard_helper = regex::escape(&style.guard_helper);
        let counter_helper = regex::escape(&style.counter_helper);
        Ok(Self {
            style,
            registrations,
            guard: Regex::new(&format!(
                r"^if\s*\(\s*!\s*{guard_helper}\s*\(\s*(\d+)\s*\)\s*\)\s*return\s*;?"
            ))?,
            counter_call: Regex::new(&format!(r"\b{counter_helper}\s*\("))?,
            helper_import: Regex::new(&format!(
                r"import[^;]*\b(?:{guard_helper}|{counter_helper})\b[^;]*from"
            ))?,
        })
    }

    fn tick_callback(
        &self,
        buf: &SourceBuffer,
        name: &str,
    ) -> Result<Option<TickCallback>, LocateError> {
        let bounds = buf.locate(name)?;
        Ok(find_tick_callback(
            buf.as_str(),
            bounds.body_start,
            bounds.body_end,
            self.registrations,
        ))
    }

    /// Insert `statement` as the first statement of the callback body,
    /// on its own line and indented like the body's first line.
    fn insert_first_statement(buf: &mut SourceBuffer, cb: &TickCallback, statement: &str) {
        let src = buf.as_str();
        let first = next_code(src, cb.body_open + 1)
            .map(|(at, _)| at)
            .unwrap_or(cb.body_close);
        let on_new_line = first < cb.body_close && src[cb.body_open..first].contains('\n');
        let indent = if on_new_line {
            line_indent(src, first).to_string()
        } else {
            format!("{}  ", line_indent(src, cb.body_open))
        };
        buf.insert(cb.body_open + 1, &format!("\n{indent}{statement}"));
    }

    /// Make the component's per-tick callback return early unless the
    /// shared tick is a multiple of `divisor`.
    pub fn inject_guard(
        &self,
        buf: &mut SourceBuffer,
        name: &str,
        divisor: u32,
    ) -> Result<GuardOutcome, LocateError> {
        let callback = self.tick_callback(buf, name)?;
        if divisor <= 1 {
            return Ok(GuardOutcome::NotNeeded);
        }
        let Some(cb) = callback else {
            return Ok(GuardOutcome::NoCallback);
        };

        let existing = next_code(buf.as_str(), cb.body_open + 1).and_then(|(first, _)| {
            let caps = self.guard.captures(&buf.as_str()[first..cb.body_close])?;
            let digits = caps.get(1)?;
            let current = digits.as_str().parse::<u32>().ok()?;
            Some((first + digits.start()..first + digits.end(), current))
        });

        if let Some((range, current)) = existing {
            if current == divisor {
                return Ok(GuardOutcome::AlreadyApplied);
            }
            buf.replace(range, &divisor.to_string());
            debug!(component = name, from = current, to = divisor, "retuned guard");
            return Ok(GuardOutcome::Retuned {
                from: current,
                to: divisor,
            });
        }

        Self::insert_first_statement(buf, &cb, &self.style.guard_statement(divisor));
        debug!(component = name, divisor, registration = %cb.registration, "injected guard");
        Ok(GuardOutcome::Injected)
    }

    /// Insert the shared tick increment into the orchestrator's own
    /// per-tick callback, never one registered by a component nested in it.
    pub fn inject_tick_counter(
        &self,
        buf: &mut SourceBuffer,
        orchestrator: &str,
    ) -> Result<GuardOutcome, LocateError> {
        let bounds = buf.locate(orchestrator)?;
        let Some(cb) = find_direct_tick_callback(
            buf.as_str(),
            bounds.body_start,
            bounds.body_end,
            self.registrations,
        ) else {
            return Ok(GuardOutcome::NoCallback);
        };

        if self
            .counter_call
            .is_match(&buf.as_str()[cb.body_open..cb.body_close])
        {
            return Ok(GuardOutcome::AlreadyApplied);
        }

        Self::insert_first_statement(buf, &cb, &self.style.counter_statement());
        debug!(component = orchestrator, "injected tick counter");
        Ok(GuardOutcome::Injected)
    }

    /// Import the helpers once any guard or counter calls them.
    pub fn ensure_helper_import(&self, buf: &mut SourceBuffer) -> ImportOutcome {
        let src = buf.as_str();
        let block_end = import_block_end(src);
        if self.helper_import.is_match(&src[..block_end]) {
            return ImportOutcome::AlreadyPresent;
        }

        let body = &src[block_end..];
        let guard_call = format!("{}(", self.style.guard_helper);
        if !body.contains(&guard_call) && !self.counter_call.is_match(body) {
            return ImportOutcome::NotNeeded;
        }

        let at = self.import_anchor(src, block_end);
        let line = self.style.import_line();
        if at > 0 && !src[..at].ends_with('\n') {
            buf.insert(at, &format!("\n{line}"));
        } else {
            buf.insert(at, &format!("{line}\n"));
        }
        debug!(module = %self.style.helper_module, "inserted helper import");
        ImportOutcome::Inserted
    }

    /// Line end of the import statement that brings in a registration
    /// function, falling back to the end of the import block.
    fn import_anchor(&self, src: &str, block_end: usize) -> usize {
        let block = &src[..block_end];
        let Some(mention) = self
            .registrations
            .iter()
            .filter_map(|r| block.find(r.as_str()))
            .min()
        else {
            return block_end;
        };

        let mut pos = line_start(block, mention);
        while pos < block_end {
            let line_end = block[pos..]
                .find('\n')
                .map(|i| pos + i + 1)
                .unwrap_or(block_end);
            let line = block[pos..line_end].trim_start();
            if line.contains(" from ") || line.starts_with("} from") {
                return line_end;
            }
            pos = line_end;
        }
        block_end
    }
}

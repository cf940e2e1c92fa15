//! Extraction of SIGMET hazard text from the dataserver XML response.

use quick_xml::{Reader, escape::resolve_predefined_entity, events::Event};

use crate::error::BriefingError;

/// Placeholder used when an `AIRSIGMET` element carries no `rawText`.
pub const MISSING_RAW_TEXT: &str = "No data";

const SIGMET_TAG: &[u8] = b"AIRSIGMET";
const RAW_TEXT_TAG: &[u8] = b"rawText";

fn malformed(reason: impl std::fmt::Display) -> BriefingError {
    BriefingError::Parse { reason: reason.to_string() }
}

/// Collect the raw text of every `AIRSIGMET` element at any depth, in document
/// order. Only the first direct `rawText` child of each element counts.
///
/// The whole document is checked: a single root element, balanced tags, known
/// entities and no stray text around the root.
pub fn parse_sigmets(xml: &str) -> Result<Vec<String>, BriefingError> {
    let mut reader = Reader::from_str(xml);

    // One slot per AIRSIGMET, filled once its rawText is seen.
    let mut found: Vec<Option<String>> = Vec::new();
    // Open AIRSIGMET elements as (depth, slot).
    let mut open: Vec<(usize, usize)> = Vec::new();
    // rawText being captured as (depth, slot).
    let mut capture: Option<(usize, usize)> = None;

    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 && root_seen {
                    return Err(malformed("more than one root element"));
                }
                root_seen = true;
                depth += 1;
                // Only text ahead of the first child element belongs to rawText.
                capture = None;

                let name = e.name();
                if name.as_ref() == SIGMET_TAG {
                    found.push(None);
                    open.push((depth, found.len() - 1));
                } else if name.as_ref() == RAW_TEXT_TAG {
                    if let Some(slot) = direct_parent_slot(&open, &found, depth) {
                        found[slot] = Some(String::new());
                        capture = Some((depth, slot));
                    }
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if root_seen {
                        return Err(malformed("more than one root element"));
                    }
                    root_seen = true;
                }
                capture = None;

                let name = e.name();
                if name.as_ref() == SIGMET_TAG {
                    found.push(None);
                } else if name.as_ref() == RAW_TEXT_TAG {
                    if let Some(slot) = direct_parent_slot(&open, &found, depth + 1) {
                        found[slot] = Some(String::new());
                    }
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(malformed("closing tag without matching opening tag"));
                }
                if capture.is_some_and(|(at, _)| at == depth) {
                    capture = None;
                }
                if open.last().is_some_and(|&(at, _)| at == depth) {
                    open.pop();
                }
                depth -= 1;
            }
            Event::Text(text) => {
                let text = text.decode()?;
                if depth == 0 {
                    if !text.trim().is_empty() {
                        return Err(malformed("text outside the root element"));
                    }
                } else if let Some((_, slot)) = capture {
                    push_text(&mut found, slot, &text);
                }
            }
            Event::CData(data) => {
                if depth == 0 {
                    return Err(malformed("CDATA outside the root element"));
                }
                if let Some((_, slot)) = capture {
                    push_text(&mut found, slot, &data.decode()?);
                }
            }
            Event::GeneralRef(entity) => {
                if depth == 0 {
                    return Err(malformed("entity reference outside the root element"));
                }
                let resolved = match entity.resolve_char_ref()? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = entity.decode()?;
                        resolve_predefined_entity(&name)
                            .ok_or_else(|| malformed(format!("undefined entity `&{name};`")))?
                            .to_string()
                    }
                };
                if let Some((_, slot)) = capture {
                    push_text(&mut found, slot, &resolved);
                }
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if depth != 0 {
        return Err(malformed("document ended with unclosed elements"));
    }
    if !root_seen {
        return Err(malformed("document has no root element"));
    }

    Ok(found
        .into_iter()
        .map(|raw| raw.unwrap_or_else(|| MISSING_RAW_TEXT.to_string()))
        .collect())
}

/// Slot of the AIRSIGMET that directly contains an element at `child_depth`,
/// if that AIRSIGMET has not seen a rawText yet.
fn direct_parent_slot(
    open: &[(usize, usize)],
    found: &[Option<String>],
    child_depth: usize,
) -> Option<usize> {
    open.last()
        .filter(|&&(at, slot)| at + 1 == child_depth && found[slot].is_none())
        .map(|&(_, slot)| slot)
}

fn push_text(found: &mut [Option<String>], slot: usize, text: &str) {
    if let Some(raw) = found[slot].as_mut() {
        raw.push_str(text);
    }
}

//! XML bodies for the registration endpoint.
//!
//! Requests are written as `<registration>` with one child per form field.
//! Replies are read the way a browser DOM would answer
//! `getElementsByTagName(name)[0].textContent`: the first element with that
//! name in document order, with all of its descendant text concatenated.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::types::RegistrationRequest;
use crate::services::errors::{RegistrationError, RegistrationResult};

pub const ROOT_ELEMENT: &str = "registration";
pub const USERNAME_ELEMENT: &str = "username";
pub const PASSWORD_ELEMENT: &str = "password";
pub const REGISTER_PASSWORD_ELEMENT: &str = "registerPassword";

pub const STATUS_ELEMENT: &str = "status";
pub const MESSAGE_ELEMENT: &str = "message";
pub const METHOD_ATTRIBUTE: &str = "method";

/// Serialize the request into the XML document the endpoint expects.
/// Values are written as-is apart from `&`, `<` and `>` escaping.
pub fn encode_registration(request: &RegistrationRequest) -> RegistrationResult<String> {
    let mut writer = Writer::new(Vec::new());

    write(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
    for (element, value) in [
        (USERNAME_ELEMENT, &request.username),
        (PASSWORD_ELEMENT, &request.password),
        (REGISTER_PASSWORD_ELEMENT, &request.confirm_password),
    ] {
        write(&mut writer, Event::Start(BytesStart::new(element)))?;
        write(
            &mut writer,
            Event::Text(BytesText::from_escaped(partial_escape(value.as_str()))),
        )?;
        write(&mut writer, Event::End(BytesEnd::new(element)))?;
    }
    write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| RegistrationError::XmlWrite {
        message: e.to_string(),
    })
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> RegistrationResult<()> {
    writer
        .write_event(event)
        .map_err(|e| RegistrationError::XmlWrite {
            message: e.to_string(),
        })
}

/// The parts of a reply document the client looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyDocument {
    pub root: String,
    /// `method` attribute of the root element
    pub method: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

impl ReplyDocument {
    pub fn require_status(&self) -> RegistrationResult<&str> {
        self.status
            .as_deref()
            .ok_or_else(|| RegistrationError::missing(STATUS_ELEMENT))
    }

    pub fn require_message(&self) -> RegistrationResult<&str> {
        self.message
            .as_deref()
            .ok_or_else(|| RegistrationError::missing(MESSAGE_ELEMENT))
    }
}

struct Capture {
    element: &'static str,
    depth: usize,
    text: String,
}

const CAPTURED: [&str; 2] = [STATUS_ELEMENT, MESSAGE_ELEMENT];

/// Parse a reply body. Anything that is not a single well-formed element tree is rejected.
pub fn parse_reply(body: &str) -> RegistrationResult<ReplyDocument> {
    let mut reader = Reader::from_str(body);
    let mut doc = ReplyDocument::default();
    let mut root_seen = false;
    let mut depth = 0usize;
    let mut active: Vec<Capture> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                open_element(&e, depth, &mut root_seen, &mut doc)?;
                depth += 1;
                let name = e.name();
                for element in CAPTURED {
                    if name.as_ref() == element.as_bytes()
                        && found(&doc, element).is_none()
                        && !active.iter().any(|c| c.element == element)
                    {
                        active.push(Capture {
                            element,
                            depth,
                            text: String::new(),
                        });
                    }
                }
            }
            Event::Empty(e) => {
                open_element(&e, depth, &mut root_seen, &mut doc)?;
                let name = e.name();
                for element in CAPTURED {
                    if name.as_ref() == element.as_bytes()
                        && found(&doc, element).is_none()
                        && !active.iter().any(|c| c.element == element)
                    {
                        store(&mut doc, element, String::new());
                    }
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(RegistrationError::MalformedXml {
                        message: "unexpected closing tag".to_string(),
                    });
                }
                let (closed, open): (Vec<Capture>, Vec<Capture>) =
                    active.into_iter().partition(|c| c.depth == depth);
                active = open;
                for capture in closed {
                    store(&mut doc, capture.element, capture.text);
                }
                depth -= 1;
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                if depth == 0 {
                    if !text.trim().is_empty() {
                        return Err(RegistrationError::MalformedXml {
                            message: "text outside of the root element".to_string(),
                        });
                    }
                    continue;
                }
                for capture in active.iter_mut() {
                    capture.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                for capture in active.iter_mut() {
                    capture.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(RegistrationError::MalformedXml {
            message: "no root element".to_string(),
        });
    }
    if depth != 0 {
        return Err(RegistrationError::MalformedXml {
            message: format!("{} element(s) left unclosed", depth),
        });
    }

    Ok(doc)
}

fn open_element(
    e: &BytesStart<'_>,
    depth: usize,
    root_seen: &mut bool,
    doc: &mut ReplyDocument,
) -> RegistrationResult<()> {
    if depth > 0 {
        return Ok(());
    }
    if *root_seen {
        return Err(RegistrationError::MalformedXml {
            message: "more than one root element".to_string(),
        });
    }
    *root_seen = true;
    doc.root = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    doc.method = match e
        .try_get_attribute(METHOD_ATTRIBUTE)
        .map_err(quick_xml::Error::from)?
    {
        Some(attr) => Some(attr.unescape_value()?.into_owned()),
        None => None,
    };
    Ok(())
}

fn found<'a>(doc: &'a ReplyDocument, element: &str) -> Option<&'a String> {
    match element {
        STATUS_ELEMENT => doc.status.as_ref(),
        MESSAGE_ELEMENT => doc.message.as_ref(),
        _ => None,
    }
}

fn store(doc: &mut ReplyDocument, element: &str, text: String) {
    let slot = match element {
        STATUS_ELEMENT => &mut doc.status,
        MESSAGE_ELEMENT => &mut doc.message,
        _ => return,
    };
    if slot.is_none() {
        *slot = Some(text);
    }
}

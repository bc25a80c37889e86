//! Atom feed parsing for arXiv query responses.

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ClientError, ClientResult};
use crate::models::Paper;

/// One page of an arXiv query response.
#[derive(Debug, Default)]
pub struct Feed {
    /// `opensearch:totalResults`, when present.
    pub total_results: Option<usize>,

    /// Parsed entries in feed order.
    pub entries: Vec<Paper>,
}

/// Text-bearing element currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
    TotalResults,
}

#[derive(Debug, Default)]
struct EntryBuilder {
    id: String,
    title: String,
    summary: String,
    published: String,
    authors: Vec<String>,
    pdf_url: Option<String>,
    abs_url: Option<String>,
    categories: Vec<String>,
    primary_category: Option<String>,
}

impl EntryBuilder {
    fn push_text(&mut self, field: Field, text: &str) {
        match field {
            Field::Id => self.id.push_str(text),
            Field::Title => self.title.push_str(text),
            Field::Summary => self.summary.push_str(text),
            Field::Published => self.published.push_str(text),
            Field::AuthorName => {
                if let Some(name) = self.authors.last_mut() {
                    name.push_str(text);
                }
            }
            Field::TotalResults => {}
        }
    }

    /// Record links and categories carried in attributes.
    fn apply_element(&mut self, e: &BytesStart<'_>) -> ClientResult<()> {
        match e.local_name().as_ref() {
            b"link" => {
                let Some(href) = attribute(e, b"href")? else {
                    return Ok(());
                };
                let title = attribute(e, b"title")?;
                let kind = attribute(e, b"type")?;
                let rel = attribute(e, b"rel")?;

                let is_pdf = title.as_deref() == Some("pdf")
                    || kind.as_deref() == Some("application/pdf");
                if is_pdf {
                    self.pdf_url.get_or_insert(href);
                } else if rel.as_deref() == Some("alternate") {
                    self.abs_url.get_or_insert(href);
                }
            }
            b"category" => {
                if let Some(term) = attribute(e, b"term")? {
                    if !self.categories.contains(&term) {
                        self.categories.push(term);
                    }
                }
            }
            b"primary_category" => {
                self.primary_category = attribute(e, b"term")?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Turn the collected text into a paper.
    ///
    /// Error entries become `BadRequest`; entries without a title are absent.
    fn finish(self) -> ClientResult<Option<Paper>> {
        if self.id.contains("/api/errors") {
            return Err(ClientError::bad_request(self.summary.trim()));
        }

        let title = collapse_whitespace(&self.title);
        if title.is_empty() {
            return Ok(None);
        }

        let published = DateTime::parse_from_rfc3339(self.published.trim())
            .map_err(|e| {
                ClientError::feed(format!(
                    "entry {} has invalid published date '{}': {e}",
                    self.id, self.published
                ))
            })?
            .with_timezone(&Utc);

        Ok(Some(Paper {
            id: self.id.trim().to_string(),
            title,
            authors: self.authors.into_iter().map(|a| collapse_whitespace(&a)).collect(),
            summary: self.summary.trim().to_string(),
            pdf_url: self.pdf_url,
            abs_url: self.abs_url,
            published,
            categories: self.categories,
            primary_category: self.primary_category,
        }))
    }
}

/// Parse an arXiv Atom response.
///
/// # Errors
///
/// Returns `ClientError::Feed` on malformed XML or an unparseable `published`
/// date, and `ClientError::BadRequest` when arXiv reports a query error.
pub fn parse_feed(xml: &str) -> ClientResult<Feed> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut feed = Feed::default();
    let mut entry: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;
    let mut total_results = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if name.as_ref() == b"entry" {
                    entry = Some(EntryBuilder::default());
                    field = None;
                } else if let Some(current) = entry.as_mut() {
                    field = match name.as_ref() {
                        b"id" => Some(Field::Id),
                        b"title" => Some(Field::Title),
                        b"summary" => Some(Field::Summary),
                        b"published" => Some(Field::Published),
                        b"name" => {
                            current.authors.push(String::new());
                            Some(Field::AuthorName)
                        }
                        _ => {
                            current.apply_element(&e)?;
                            None
                        }
                    };
                } else {
                    field = (name.as_ref() == b"totalResults").then_some(Field::TotalResults);
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(current) = entry.as_mut() {
                    current.apply_element(&e)?;
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(target) = field {
                    let text = t.unescape().map_err(|e| ClientError::feed(e.to_string()))?;
                    match (target, entry.as_mut()) {
                        (Field::TotalResults, _) => total_results.push_str(&text),
                        (_, Some(current)) => current.push_text(target, &text),
                        _ => {}
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if let (Some(target), Some(current)) = (field, entry.as_mut()) {
                    current.push_text(target, &String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::End(e)) => {
                field = None;
                if e.local_name().as_ref() == b"entry" {
                    if let Some(paper) = entry.take().map(EntryBuilder::finish).transpose()? {
                        feed.entries.extend(paper);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ClientError::feed(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    feed.total_results = total_results.trim().parse().ok();
    Ok(feed)
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> ClientResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ClientError::feed(err.to_string()))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value().map_err(|err| ClientError::feed(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

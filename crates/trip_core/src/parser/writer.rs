use std::borrow::Cow;
use std::io::{self, Write};

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use crate::trip::TripRecord;

use super::TRIP_ELEMENT;

const ROOT_ELEMENT: &str = "tripinfos";

/// Serialize trip records back into trip-log XML.
///
/// Numbers use the shortest representation that parses back to the same
/// `f64`. Tabs and line breaks in string attributes are written as character
/// references, so parsing the output reproduces the records exactly.
pub fn write_tripinfo_xml<W: Write>(records: &[TripRecord], writer: W) -> io::Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 4);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(to_io)?;
    xml.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
        .map_err(to_io)?;
    for record in records {
        xml.write_event(Event::Empty(trip_element(record)))
            .map_err(to_io)?;
    }
    xml.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
        .map_err(to_io)?;

    let mut inner = xml.into_inner();
    inner.write_all(b"\n")?;
    inner.flush()
}

fn trip_element(record: &TripRecord) -> BytesStart<'static> {
    let mut element = BytesStart::new(TRIP_ELEMENT);
    element.push_attribute(text_attribute("id", &record.id));
    element.push_attribute(number_attribute("depart", record.depart));
    element.push_attribute(number_attribute("arrival", record.arrival));
    element.push_attribute(number_attribute("duration", record.duration));
    element.push_attribute(number_attribute("waitingTime", record.waiting_time));
    element.push_attribute(number_attribute("routeLength", record.route_length));
    element.push_attribute(text_attribute("departLane", &record.depart_lane));
    element.push_attribute(text_attribute("arrivalLane", &record.arrival_lane));
    element
}

fn number_attribute(key: &'static str, value: f64) -> Attribute<'static> {
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(value.to_string().into_bytes()),
    }
}

/// Markup is escaped by quick-xml; whitespace other than the plain space is
/// written as a character reference so attribute-value normalization on the
/// reading side leaves it intact.
fn text_attribute(key: &'static str, value: &str) -> Attribute<'static> {
    let mut escaped = String::with_capacity(value.len());
    for ch in escape(value).chars() {
        match ch {
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(ch),
        }
    }
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}

fn to_io<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::Other, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute_text(attribute: &Attribute<'_>) -> String {
        String::from_utf8(attribute.value.to_vec()).unwrap()
    }

    #[test]
    fn escapes_markup_in_identifiers() {
        let attribute = text_attribute("id", r#"a<b>&"c"#);
        assert_eq!(attribute_text(&attribute), "a&lt;b&gt;&amp;&quot;c");
    }

    #[test]
    fn whitespace_becomes_character_references() {
        let attribute = text_attribute("id", "veh\t0\nx\r");
        assert_eq!(attribute_text(&attribute), "veh&#9;0&#10;x&#13;");
    }

    #[test]
    fn writes_one_element_per_record() {
        let records = vec![
            TripRecord::new("veh0", 0.0, 10.0, 10.0, 0.0, 50.0, "a_0", "b_0"),
            TripRecord::new("veh1", 2.5, 12.5, 10.0, 1.0, 60.0, "a_0", "b_0"),
        ];
        let mut buffer = Vec::new();
        write_tripinfo_xml(&records, &mut buffer).unwrap();

        let xml = String::from_utf8(buffer).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert_eq!(xml.matches("<tripinfo ").count(), 2);
        assert!(xml.contains(r#"depart="2.5""#));
        assert!(xml.trim_end().ends_with("</tripinfos>"));
    }
}

use crate::error::MalformedInputError;

/// Attribute access for one trip element, with errors that name the record.
pub(super) struct TripElement<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
    record: usize,
}

impl<'a, 'input> TripElement<'a, 'input> {
    pub(super) fn new(node: roxmltree::Node<'a, 'input>, record: usize) -> Self {
        Self { node, record }
    }

    pub(super) fn text(&self, name: &str) -> String {
        self.node.attribute(name).unwrap_or_default().to_string()
    }

    pub(super) fn required_number(
        &self,
        name: &'static str,
    ) -> Result<f64, MalformedInputError> {
        let value = self
            .node
            .attribute(name)
            .ok_or_else(|| MalformedInputError::MissingAttribute {
                record: self.record,
                trip_id: self.trip_id(),
                attribute: name,
            })?;
        self.parse_number(name, value)
    }

    pub(super) fn optional_number(
        &self,
        name: &'static str,
        default: f64,
    ) -> Result<f64, MalformedInputError> {
        match self.node.attribute(name) {
            Some(value) => self.parse_number(name, value),
            None => Ok(default),
        }
    }

    fn parse_number(&self, name: &'static str, value: &str) -> Result<f64, MalformedInputError> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| MalformedInputError::InvalidNumber {
                record: self.record,
                trip_id: self.trip_id(),
                attribute: name,
                value: value.to_string(),
            })
    }

    fn trip_id(&self) -> Option<String> {
        self.node.attribute("id").map(str::to_string)
    }
}

use crate::error::RecordError;
use csv::StringRecord;

/// Number of positional fields a customer row must carry.
pub const CUSTOMER_FIELDS: usize = 5;

/// One CSV row as read from the input, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    line: u64,
    fields: StringRecord,
}

impl RawRecord {
    pub fn new(line: u64, fields: StringRecord) -> Self {
        Self { line, fields }
    }

    /// Build a record from plain strings, mostly useful in tests.
    pub fn from_fields<I, T>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field.as_ref());
        }
        Self::new(line, record)
    }

    /// 1-based line number in the input file.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index)
    }
}

/// Typed, borrowed view over the positional fields of a customer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerView<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub gender: &'a str,
    pub ip_address: &'a str,
}

impl<'a> TryFrom<&'a RawRecord> for CustomerView<'a> {
    type Error = RecordError;

    /// Rows shorter than five fields are rejected rather than padded; extra
    /// trailing fields are ignored.
    fn try_from(record: &'a RawRecord) -> Result<Self, Self::Error> {
        let field = move |index: usize| {
            record.get(index).ok_or(RecordError::MalformedRecord {
                line: record.line(),
                fields: record.len(),
            })
        };

        Ok(Self {
            first_name: field(0)?,
            last_name: field(1)?,
            email: field(2)?,
            gender: field(3)?,
            ip_address: field(4)?,
        })
    }
}

/// A validated domain and how many customers it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEvent {
    pub domain: String,
    pub count: u64,
}

impl DomainEvent {
    pub fn single(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            count: 1,
        }
    }
}

/// A record a worker rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub error: RecordError,
}

impl From<RecordError> for ErrorEvent {
    fn from(error: RecordError) -> Self {
        Self { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_view_maps_positional_fields() {
        let record = RawRecord::from_fields(
            2,
            ["Mildred", "Hernandez", "mhernandez0@github.io", "Female", "38.194.51.128"],
        );
        let customer = CustomerView::try_from(&record).unwrap();

        assert_eq!(customer.first_name, "Mildred");
        assert_eq!(customer.last_name, "Hernandez");
        assert_eq!(customer.email, "mhernandez0@github.io");
        assert_eq!(customer.gender, "Female");
        assert_eq!(customer.ip_address, "38.194.51.128");
    }

    #[test]
    fn test_short_record_is_rejected_not_padded() {
        let record = RawRecord::from_fields(9, ["Bonnie", "Ortiz", "bortiz1@cyberchimps.com"]);
        let err = CustomerView::try_from(&record).unwrap_err();

        assert_eq!(err, RecordError::MalformedRecord { line: 9, fields: 3 });
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = RawRecord::from_fields(4, ["a", "b", "c@d.com", "e", "f", "extra"]);
        let customer = CustomerView::try_from(&record).unwrap();
        assert_eq!(customer.ip_address, "f");
    }
}

use crate::domain::transaction::TransactionSummary;
use crate::error::Result;
use std::io::Write;

/// Writes transaction summaries to a CSV sink.
///
/// This writer wraps `csv::Writer` and emits one record per summary with a
/// header row derived from the field names.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    /// Creates a new `SummaryWriter` over any `Write` sink (e.g., Stdout, File).
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Serializes all summaries and flushes the underlying sink.
    pub fn write_summaries<I>(&mut self, summaries: I) -> Result<()>
    where
        I: IntoIterator<Item = TransactionSummary>,
    {
        for summary in summaries {
            self.writer.serialize(summary)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionStatus;
    use rust_decimal_macros::dec;

    fn sample_summary() -> TransactionSummary {
        TransactionSummary {
            id: "txn_0001".to_string(),
            reference: "PAY-100000".to_string(),
            amount: dec!(240.50),
            currency: "USD".to_string(),
            status: TransactionStatus::Success,
            created_at: "2026-02-16T08:30:00Z".parse().unwrap(),
            customer_email: "customer1@example.com".to_string(),
        }
    }

    #[test]
    fn test_writer_emits_header_and_rows() {
        let mut writer = SummaryWriter::new(Vec::new());
        writer.write_summaries([sample_summary()]).unwrap();

        let output = String::from_utf8(writer.writer.into_inner().unwrap()).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,reference,amount,currency,status,created_at,customer_email")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("txn_0001,PAY-100000,240.50,USD,success,"));
        assert!(row.ends_with(",customer1@example.com"));
    }

    #[test]
    fn test_writer_handles_empty_input() {
        let mut writer = SummaryWriter::new(Vec::new());
        writer.write_summaries([]).unwrap();

        let output = String::from_utf8(writer.writer.into_inner().unwrap()).unwrap();
        assert!(output.is_empty());
    }
}

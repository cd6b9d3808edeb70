use crate::table::{RowScanner, ScanResult};
use crate::value::Value;

/// This trait is implemented by row types which know how to map themselves to a table.
///
/// The column order read by [`TableRow::populate`] and the value order returned by
/// [`TableRow::fields`] are chosen by the implementation; they are not required to match,
/// and they must match the statements the caller issues.
///
/// It can be derived with `#[derive(TableRow)]`.
pub trait TableRow {
    /// Reads the current row of `row` into `self`, in the column order expected by the type.
    fn populate(&mut self, row: &dyn RowScanner) -> ScanResult<()>;

    /// Returns the persisted fields, in the positional order used to bind statements.
    fn fields(&self) -> Vec<Value>;
}

/// The mapping contract a table manager is generic over.
///
/// It is implemented by a companion type `Self` for the row type `T`, and operates on a
/// reference to a `T` instance owned by the caller. Every [`TableRow`] is its own mapping;
/// a different companion type can provide another layout for the same row type.
pub trait RowMapping<T> {
    /// Reads the current row of `scanner` into `row`.
    fn populate(row: &mut T, scanner: &dyn RowScanner) -> ScanResult<()>;

    /// Returns the values to bind for `row`.
    fn fields(row: &T) -> Vec<Value>;
}

impl<T> RowMapping<T> for T
where
    T: TableRow,
{
    fn populate(row: &mut T, scanner: &dyn RowScanner) -> ScanResult<()> {
        TableRow::populate(row, scanner)
    }

    fn fields(row: &T) -> Vec<Value> {
        TableRow::fields(row)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::driver::SingleRow;

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: i64,
        owner: String,
    }

    impl TableRow for Account {
        fn populate(&mut self, row: &dyn RowScanner) -> ScanResult<()> {
            (self.id, self.owner) = row.scan()?;
            Ok(())
        }

        fn fields(&self) -> Vec<Value> {
            vec![self.owner.clone().into(), self.id.into()]
        }
    }

    /// Alternative layout for [`Account`], with the owner first.
    struct OwnerFirst;

    impl RowMapping<Account> for OwnerFirst {
        fn populate(row: &mut Account, scanner: &dyn RowScanner) -> ScanResult<()> {
            (row.owner, row.id) = scanner.scan()?;
            Ok(())
        }

        fn fields(row: &Account) -> Vec<Value> {
            vec![row.id.into()]
        }
    }

    #[test]
    fn test_table_row_should_be_its_own_mapping() {
        let mut account = Account::default();
        let row = SingleRow::new(vec![Value::Int64(1), Value::Text("alice".to_string())]);
        <Account as RowMapping<Account>>::populate(&mut account, &row).unwrap();

        assert_eq!(
            account,
            Account {
                id: 1,
                owner: "alice".to_string()
            }
        );
        assert_eq!(
            <Account as RowMapping<Account>>::fields(&account),
            vec![Value::Text("alice".to_string()), Value::Int64(1)]
        );
    }

    #[test]
    fn test_should_use_companion_mapping() {
        let mut account = Account::default();
        let row = SingleRow::new(vec![Value::Text("bob".to_string()), Value::Int64(2)]);
        OwnerFirst::populate(&mut account, &row).unwrap();

        assert_eq!(account.id, 2);
        assert_eq!(account.owner, "bob");
        assert_eq!(OwnerFirst::fields(&account), vec![Value::Int64(2)]);
    }
}

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use super::sample_struct::Sample;
use super::schema::{Attribute, AttributeKind, Schema};

/// Cells that denote a missing value.
const MISSING: [&str; 2] = ["", "?"];


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV file to [`Sample`].
///
/// A column whose cells all parse as numbers is numeric;
/// any other column is categorical,
/// with its labels in order of first appearance.
/// Empty cells and `?` are missing values.
///
/// With [`SampleReader::schema`], the columns are encoded
/// with the given attributes instead,
/// so that a test file shares the codes of the training file.
///
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use minivote::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::new()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .categorical_target(true)
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    categorical_target: Option<bool>,
    schema: Option<Schema>,
}


impl<P, S> SampleReader<P, S> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
            categorical_target: None,
            schema: None,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Force the target column to be categorical (`true`)
    /// or numeric (`false`).
    /// By default, the kind is inferred from the cells.
    pub fn categorical_target(mut self, flag: bool) -> Self {
        self.categorical_target = Some(flag);
        self
    }


    /// Encode the columns with the attributes of `schema`.
    /// Columns are looked up by name, so the file needs a header.
    /// The target column is `schema.target()`,
    /// and a label that `schema` does not list is an error.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for target label.
    /// Without a header, columns are named `Feat. [1]`, `Feat. [2]`, ...
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }


    /// Reads CSV text from `reader`.
    pub fn read_from<R: Read>(self, reader: R) -> io::Result<Sample> {
        let mut lines = BufReader::new(reader).lines();

        let mut names = Vec::new();
        if self.has_header {
            let line = lines.next()
                .ok_or_else(|| invalid("The file is empty"))??;
            names = line.split(',')
                .map(|name| name.trim().to_string())
                .collect::<Vec<_>>();
        }

        // Collect the cells column by column.
        let mut columns: Vec<Vec<String>> = Vec::new();
        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<_>>();

            if names.is_empty() {
                names = (1..=cells.len())
                    .map(|k| format!("Feat. [{k}]"))
                    .collect();
            }
            if columns.is_empty() {
                columns = vec![Vec::new(); names.len()];
            }
            if cells.len() != names.len() {
                return Err(invalid(format!(
                    "Line {i} has {} cells, expected {}",
                    cells.len(), names.len()
                )));
            }
            columns.iter_mut()
                .zip(cells)
                .for_each(|(col, cell)| { col.push(cell); });
        }
        if columns.is_empty() {
            columns = vec![Vec::new(); names.len()];
        }

        if let Some(schema) = &self.schema {
            return encode_with(schema, &names[..], &columns[..]);
        }

        let target = self.target.as_ref()
            .ok_or_else(|| invalid(
                "Target (class) column is not specified. \
                Use `SampleReader::target_feature`."
            ))?;
        let target = target.as_ref();

        let pos = names.iter()
            .position(|name| name == target)
            .ok_or_else(|| invalid(format!(
                "The target class \"{target}\" does not exist"
            )))?;

        let mut attributes = Vec::with_capacity(names.len());
        let mut encoded = Vec::with_capacity(names.len());
        for (k, (name, cells)) in names.iter().zip(&columns).enumerate() {
            let force = if k == pos { self.categorical_target } else { None };
            let (attribute, values) = encode_column(name, cells, force)?;
            attributes.push(attribute);
            encoded.push(values);
        }

        let target_attribute = attributes.remove(pos);
        let target_values = encoded.remove(pos);

        let schema = Schema::new(attributes, target_attribute);
        let mut sample = Sample::new(schema);
        for (row, y) in target_values.into_iter().enumerate() {
            let x = encoded.iter()
                .map(|col| col[row])
                .collect::<Vec<f64>>();
            sample.push(x, Some(y));
        }
        Ok(sample)
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments,
    /// and returns `std::io::Result<Sample>`.
    /// This method consumes `self.`
    pub fn read(mut self) -> io::Result<Sample> {
        let file = self.file.take()
            .ok_or_else(|| invalid("The file name for csv is not set"))?;
        let file = File::open(file.as_ref())?;
        self.read_from(file)
    }
}


/// Encodes every column of `schema`, looked up by name.
fn encode_with(schema: &Schema, names: &[String], columns: &[Vec<String>])
    -> io::Result<Sample>
{
    let column = |attribute: &Attribute| {
        names.iter()
            .position(|name| name == attribute.name())
            .map(|k| &columns[k][..])
            .ok_or_else(|| invalid(format!(
                "The column \"{}\" does not exist", attribute.name()
            )))
    };

    let encoded = schema.features()
        .iter()
        .map(|attribute| encode_as(attribute, column(attribute)?))
        .collect::<io::Result<Vec<_>>>()?;
    let target = encode_as(schema.target(), column(schema.target())?)?;

    let mut sample = Sample::new(schema.clone());
    for (row, y) in target.into_iter().enumerate() {
        let x = encoded.iter()
            .map(|col| col[row])
            .collect::<Vec<f64>>();
        sample.push(x, Some(y));
    }
    Ok(sample)
}


/// Encodes the cells of one column as `attribute`.
fn encode_as(attribute: &Attribute, cells: &[String]) -> io::Result<Vec<f64>> {
    cells.iter()
        .map(|cell| {
            if is_missing(cell) { return Ok(f64::NAN); }
            match attribute.kind() {
                AttributeKind::Numeric => cell.parse::<f64>()
                    .map_err(|_| invalid(format!(
                        "The column \"{}\" contains non-numerical values",
                        attribute.name()
                    ))),
                AttributeKind::Categorical(_) => attribute.index_of(cell)
                    .map(|k| k as f64)
                    .ok_or_else(|| invalid(format!(
                        "Unknown label \"{cell}\" in the column \"{}\"",
                        attribute.name()
                    ))),
            }
        })
        .collect()
}


/// Encodes the cells of one column.
/// `force` overrides the inferred kind.
fn encode_column(name: &str, cells: &[String], force: Option<bool>)
    -> io::Result<(Attribute, Vec<f64>)>
{
    let all_numeric = cells.iter()
        .filter(|c| !is_missing(c))
        .all(|c| c.parse::<f64>().is_ok());

    let categorical = force.unwrap_or(!all_numeric);
    if !categorical {
        if !all_numeric {
            return Err(invalid(format!(
                "The column \"{name}\" contains non-numerical values"
            )));
        }
        let values = cells.iter()
            .map(|c| if is_missing(c) { f64::NAN } else {
                c.parse::<f64>().unwrap_or(f64::NAN)
            })
            .collect();
        return Ok((Attribute::numeric(name), values));
    }

    let mut labels: Vec<String> = Vec::new();
    let mut values = Vec::with_capacity(cells.len());
    for cell in cells {
        if is_missing(cell) {
            values.push(f64::NAN);
            continue;
        }
        let k = match labels.iter().position(|l| l == cell) {
            Some(k) => k,
            None => {
                labels.push(cell.clone());
                labels.len() - 1
            },
        };
        values.push(k as f64);
    }
    Ok((Attribute::categorical(name, labels), values))
}


fn is_missing(cell: &str) -> bool {
    MISSING.contains(&cell)
}


fn invalid<E>(message: E) -> io::Error
    where E: Into<Box<dyn std::error::Error + Send + Sync>>
{
    io::Error::new(io::ErrorKind::InvalidData, message)
}

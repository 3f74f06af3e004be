use argh::FromArgs;
use std::path::PathBuf;

use zipcast_core::LookupError;
use zipcast_forecast::AddressQuery;

#[derive(FromArgs, Debug)]
/// Look up the current forecast for a US postal address
pub struct Args {
    /// street address, e.g. "525 Winchester Boulevard"
    #[argh(option)]
    pub street: Option<String>,

    /// city name
    #[argh(option)]
    pub city: Option<String>,

    /// state or region
    #[argh(option)]
    pub state: Option<String>,

    /// postal (ZIP) code; also the cache key
    #[argh(option)]
    pub zip_code: Option<String>,

    /// path to the configuration file
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// print the reading as JSON
    #[argh(switch)]
    pub json: bool,

    /// read one `street|city|state|zip` record per line from stdin,
    /// sharing the cache across lookups
    #[argh(switch)]
    pub stdin: bool,
}

impl Args {
    /// Build the address query, rejecting the first absent or blank field.
    pub fn address_query(&self) -> Result<AddressQuery, LookupError> {
        let street = required("street", &self.street)?;
        let city = required("city", &self.city)?;
        let state = required("state", &self.state)?;
        let zip_code = required("zip_code", &self.zip_code)?;
        Ok(AddressQuery::new(street, city, state, zip_code))
    }
}

/// Field separator for records read from stdin.
pub const RECORD_SEPARATOR: char = '|';

/// Parse one `street|city|state|zip` record.
///
/// Fields are kept as written, so the postal code is the cache key verbatim.
pub fn parse_record(line: &str) -> Result<AddressQuery, LookupError> {
    let mut fields = line.split(RECORD_SEPARATOR);
    let mut next = |name: &str| -> Result<String, LookupError> {
        let value = fields.next().map(str::to_string);
        let field = required(name, &value)?.to_string();
        Ok(field)
    };
    let street = next("street")?;
    let city = next("city")?;
    let state = next("state")?;
    let zip_code = next("zip_code")?;
    Ok(AddressQuery::new(street, city, state, zip_code))
}

/// Present and not blank; the value itself is passed through untrimmed.
fn required<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, LookupError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| LookupError::ParameterMissing(name.to_string()))
}

use crate::args::ConvertArgs;
use crate::input;
use crate::types::ConvertFormat;
use anyhow::Result;
use termtable_data::TableData;

pub fn handle(args: &ConvertArgs) -> Result<()> {
    let data = input::read_table(&args.input)?;
    let output = convert(&data, args.to, args.pretty)?;
    print!("{}", output);
    Ok(())
}

/// JSON output ends with a newline; CSV records already do.
pub fn convert(data: &TableData, to: ConvertFormat, pretty: bool) -> Result<String> {
    let output = match to {
        ConvertFormat::Csv => data.to_csv(true)?,
        ConvertFormat::Json => {
            let mut json = data.to_json(pretty)?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}

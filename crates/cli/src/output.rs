use crate::error::CliError;
use filters::tokenizer::ParsedExpression;
use model::core::value::Value;
use serde::Serialize;

#[derive(Serialize)]
struct CompiledReport<'a> {
    dialect: &'a str,
    sql: Option<&'a str>,
    params: &'a [Value],
}

pub fn print_compiled(
    dialect: &str,
    rendered: Option<(String, Vec<Value>)>,
    as_json: bool,
) -> Result<(), CliError> {
    let (sql, params) = match &rendered {
        Some((sql, params)) => (Some(sql.as_str()), params.as_slice()),
        None => (None, &[][..]),
    };

    if as_json {
        let report = CompiledReport {
            dialect,
            sql,
            params,
        };
        let json = serde_json::to_string_pretty(&report).map_err(CliError::JsonSerialize)?;
        println!("{json}");
        return Ok(());
    }

    match sql {
        Some(sql) => {
            println!("{sql}");
            for (i, value) in params.iter().enumerate() {
                println!("  {}: {value}", i + 1);
            }
        }
        None => println!("-- no filtering"),
    }
    Ok(())
}

pub fn print_tokens(parsed: &ParsedExpression) {
    if parsed.is_empty() {
        println!("-- empty expression");
    }

    for (i, group) in parsed.iter().enumerate() {
        println!("OR group {}:", i + 1);
        for segment in group {
            let marker = if segment.negate { "NOT " } else { "" };
            println!("  {marker}{:?}", segment.text);
        }
    }
}

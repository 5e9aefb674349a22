use crate::error::ConnectorError;
use model::core::value::Value;
use rust_decimal::Decimal as RustDecimal;
use std::str::FromStr;
use tokio_postgres::types::ToSql;

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    /// Fails for decimals outside the range `NUMERIC` parameters can carry.
    pub fn from_value(value: &Value) -> Result<Self, ConnectorError> {
        let param = match value {
            Value::Int(v) => PgParam(Box::new(*v)),
            Value::Decimal(v) => {
                let text = v.to_string();
                let decimal = RustDecimal::from_str(&text)
                    .or_else(|_| RustDecimal::from_scientific(&text))
                    .map_err(|e| ConnectorError::UnsupportedParam(format!("{text}: {e}")))?;
                PgParam(Box::new(decimal))
            }
            Value::String(v) => PgParam(Box::new(v.clone())),
            Value::Null => PgParam(Box::new(Option::<String>::None)),
        };
        Ok(param)
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: &[Value]) -> Result<Self, ConnectorError> {
        let params = values
            .iter()
            .map(PgParam::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { params })
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}

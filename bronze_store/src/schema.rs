// Hand-maintained to match migrations/*_create_bronze. The uniqueness key
// (symbol, date, source) stands in for a primary key.

diesel::table! {
    bronze.stock_prices (symbol, date, source) {
        symbol -> Text,
        date -> Date,
        open -> Numeric,
        high -> Numeric,
        low -> Numeric,
        close -> Numeric,
        adj_close -> Numeric,
        volume -> Int8,
        source -> Text,
        ingestion_timestamp -> Timestamp,
    }
}

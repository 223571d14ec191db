pub mod subconverter;

pub use subconverter::{
    convert_subscription_text, ConversionResult, ConverterInfo, HttpFetcher,
    SubscriptionConverter, SubscriptionFetcher,
};

use dkimkey::LookupTxt;
use std::{future::Future, io, pin::Pin, sync::Arc};

pub type LookupOutput = Vec<io::Result<Vec<Box<[u8]>>>>;
pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = io::Result<LookupOutput>> + Send + 'a>>;

#[derive(Clone)]
pub struct MockLookup(Arc<dyn Fn(&str) -> LookupFuture<'_> + Send + Sync>);

impl MockLookup {
    pub fn new(f: impl Fn(&str) -> LookupFuture<'_> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl LookupTxt for MockLookup {
    type Answer = LookupOutput;
    type Query<'a> = Pin<Box<dyn Future<Output = io::Result<Self::Answer>> + Send + 'a>>;

    fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
        let domain = domain.to_owned();

        Box::pin(async move { self.0(&domain).await })
    }
}

/// A resolver that answers every query with the given TXT records, each
/// record made up of one fragment.
pub fn single_fragment_records(records: &[&str]) -> MockLookup {
    let records: Vec<Vec<u8>> = records.iter().map(|r| r.as_bytes().to_vec()).collect();

    MockLookup::new(move |_| {
        let records = records.clone();

        Box::pin(async move {
            Ok(records
                .into_iter()
                .map(|r| Ok(vec![r.into_boxed_slice()]))
                .collect())
        })
    })
}

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Carrier for one request/response round trip through a handler chain.
///
/// The output slot is write-once: the first committed response is final and
/// any later commit fails with [`ExchangeError::OutputCommitted`].
pub struct Exchange<I, O>
where
    I: Default + Send,
    O: Send,
{
    input: I,
    output: Option<O>,
    attachments: Attachments,
}

impl<I, O> Exchange<I, O>
where
    I: Default + Send,
    O: Send,
{
    pub fn new() -> Self {
        Self {
            input: I::default(),
            output: None,
            attachments: Attachments::new(),
        }
    }

    pub fn save_input(&mut self, request: I) {
        self.input = request;
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn consume_input(&mut self) -> I {
        std::mem::take(&mut self.input)
    }

    pub fn save_output(&mut self, response: O) -> Result<(), ExchangeError> {
        if self.output.is_some() {
            return Err(ExchangeError::OutputCommitted);
        }
        self.output = Some(response);
        Ok(())
    }

    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    pub fn output_committed(&self) -> bool {
        self.output.is_some()
    }

    pub fn consume_output(&mut self) -> Option<O> {
        self.output.take()
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }
}

impl<I, O> Default for Exchange<I, O>
where
    I: Default + Send,
    O: Send,
{
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq)]
pub enum ExchangeError {
    OutputCommitted,
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeError::OutputCommitted => {
                write!(f, "exchange output has already been committed")
            }
        }
    }
}

impl Error for ExchangeError {}

pub struct Attachments {
    attachments: HashMap<(AttachmentKey, TypeId), Box<dyn Any + Send>>,
}

impl Attachments {
    pub fn new() -> Self {
        Self {
            attachments: HashMap::new(),
        }
    }

    pub fn add_attachment<K>(&mut self, key: AttachmentKey, value: Box<dyn Any + Send>)
    where
        K: Send + 'static,
    {
        let type_id = TypeId::of::<K>();
        self.attachments.insert((key, type_id), value);
    }

    pub fn attachment<K>(&self, key: AttachmentKey) -> Option<&K>
    where
        K: Send + 'static,
    {
        let type_id = TypeId::of::<K>();
        if let Some(option_any) = self.attachments.get(&(key, type_id)) {
            option_any.downcast_ref::<K>()
        } else {
            None
        }
    }

    pub fn attachment_mut<K>(&mut self, key: AttachmentKey) -> Option<&mut K>
    where
        K: Send + 'static,
    {
        let type_id = TypeId::of::<K>();
        if let Some(option_any) = self.attachments.get_mut(&(key, type_id)) {
            option_any.downcast_mut::<K>()
        } else {
            None
        }
    }
}

impl Default for Attachments {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(PartialOrd, PartialEq, Hash, Eq)]
pub struct AttachmentKey(pub u32);

#[cfg(test)]
mod test {
    use crate::exchange::{AttachmentKey, Exchange, ExchangeError};

    #[test]
    fn test_output_write_once() {
        let mut exchange: Exchange<String, String> = Exchange::new();
        assert!(!exchange.output_committed());

        exchange.save_output("first".to_string()).unwrap();
        let second = exchange.save_output("second".to_string());
        assert_eq!(second, Err(ExchangeError::OutputCommitted));

        assert_eq!(exchange.consume_output().unwrap(), "first");
        assert!(exchange.consume_output().is_none());
    }

    #[test]
    fn test_typed_attachments() {
        const KEY: AttachmentKey = AttachmentKey(99);

        let mut exchange: Exchange<String, String> = Exchange::new();
        exchange
            .attachments_mut()
            .add_attachment::<String>(KEY, Box::new("admin".to_string()));

        assert_eq!(
            exchange.attachments().attachment::<String>(KEY),
            Some(&"admin".to_string())
        );
        /* same key, different type */
        assert!(exchange.attachments().attachment::<u32>(KEY).is_none());
    }
}

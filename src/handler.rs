use crate::HandlerOutput;
use crate::exchange::Exchange;

pub trait Handler<I, O>: Send
where
    I: Default + Send,
    O: Send,
{
    fn process<'i1, 'i2, 'o>(&'i1 self, exchange: &'i2 mut Exchange<I, O>) -> HandlerOutput<'o>
    where
        'i1: 'o,
        'i2: 'o,
        Self: 'o;
}

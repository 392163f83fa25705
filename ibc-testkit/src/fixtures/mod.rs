pub mod clients;
pub mod core;

use std::fmt::Debug;

use ibc_tao::handler::types::error::ContextError;

use crate::context::MockContext;

pub enum Expect {
    Success,
    Failure(Option<ContextError>),
}

#[derive(Debug)]
pub struct Fixture<M: Debug> {
    pub ctx: MockContext,
    pub msg: M,
}

impl<M: Debug> Fixture<M> {
    pub fn generate_error_msg<T: Debug>(
        &self,
        expect: &Expect,
        process: &str,
        res: &Result<T, ContextError>,
    ) -> String {
        let base_error = match expect {
            Expect::Success => "step failed!",
            Expect::Failure(_) => "step passed but was supposed to fail!",
        };
        format!(
            "{process} {base_error} \n {res:?} \n {:?} \n {:?}",
            &self.msg, &self.ctx
        )
    }
}

pub mod topo;
pub mod validator;

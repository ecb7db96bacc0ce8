pub mod vast_server;

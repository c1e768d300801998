mod config_file;
mod tcp;
mod udp;

mod extract;
mod probe;

mod matching;
mod tracing;

mod conversation_state;
mod helpers;
mod mention_flow;
mod stream_events;

pub mod card_requests;
